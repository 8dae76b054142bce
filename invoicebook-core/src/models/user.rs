use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::require;
use crate::error::AppResult;

/// User model representing an invoice sender.
///
/// This struct maps to the `users` table. Username and email are unique.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique identifier for the user
    pub user_id: Uuid,

    pub username: String,

    /// User's email address (unique)
    pub email: String,

    /// Bcrypt hashed password
    #[serde(skip_serializing)]
    #[sqlx(rename = "password")]
    pub password_hash: String,

    pub first_name: String,
    pub last_name: String,
    pub profile_picture_url: String,
    pub phone_number: String,
    pub address: String,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

/// User creation request (plaintext password, hashed before storage)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub profile_picture_url: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub address: String,
}

impl CreateUser {
    pub fn validate(&self) -> AppResult<()> {
        require("username", &self.username)?;
        require("email", &self.email)?;
        require("password", &self.password)?;
        require("first_name", &self.first_name)?;
        require("last_name", &self.last_name)
    }
}
