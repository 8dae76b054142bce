use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

/// Error kinds surfaced by the domain layer.
///
/// Validation kinds are raised before any write is attempted. Storage
/// failures carry the driver error so the caller sees its message.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// An identifier string did not parse as a UUID.
    #[error("invalid {0}")]
    InvalidReference(&'static str),

    /// A status string is not one of the recognized invoice statuses.
    #[error("invalid invoice status: {0}")]
    InvalidStatus(String),

    /// A date string did not match `YYYY-MM-DD`.
    #[error("{0} has invalid date format")]
    InvalidDateFormat(&'static str),

    #[error("{0} is required")]
    MissingField(&'static str),

    /// The request body could not be decoded.
    #[error("{0}")]
    InvalidBody(String),

    #[error("password exceeds the maximum length of 72 bytes")]
    PasswordTooLong,

    /// Storage refused a supplied value as out of range or too long.
    #[error("{0}")]
    InvalidValue(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    /// Uniqueness, foreign-key or check constraint rejected a write.
    #[error("{0}")]
    ConstraintViolation(String),

    /// Connection, transaction or query failure.
    #[error(transparent)]
    Storage(sqlx::Error),

    #[error("failed to hash password: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidReference(_)
            | AppError::InvalidStatus(_)
            | AppError::InvalidDateFormat(_)
            | AppError::MissingField(_)
            | AppError::InvalidBody(_)
            | AppError::PasswordTooLong
            | AppError::InvalidValue(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConstraintViolation(_) => StatusCode::CONFLICT,
            AppError::Storage(_) | AppError::PasswordHash(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("record"),
            sqlx::Error::Database(db)
                if db.is_unique_violation()
                    || db.is_foreign_key_violation()
                    || db.is_check_violation() =>
            {
                AppError::ConstraintViolation(db.message().to_string())
            }
            sqlx::Error::Database(db) if is_data_exception(db.code().as_deref()) => {
                AppError::InvalidValue(db.message().to_string())
            }
            other => AppError::Storage(other),
        }
    }
}

/// SQLSTATE class 22 covers overflow, truncation and malformed literals.
fn is_data_exception(code: Option<&str>) -> bool {
    code.is_some_and(|code| code.starts_with("22"))
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidBody(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
