use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};
use tracing::info;

use super::ApiJson;
use crate::error::AppResult;
use crate::models::{AddCustomer, AddPaymentMethod, CreateUser};
use crate::service;
use crate::AppState;

/// `POST /v1/user`
pub async fn create_user(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateUser>,
) -> AppResult<(StatusCode, Json<Value>)> {
    request.validate()?;
    info!("Create user request for username: {}", request.username);

    let user_id = service::create_user(&state.db, request).await?;
    Ok((StatusCode::CREATED, Json(json!({ "user_id": user_id }))))
}

/// `POST /v1/customer`
pub async fn add_customer(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<AddCustomer>,
) -> AppResult<(StatusCode, Json<Value>)> {
    request.validate()?;

    let customer_id = service::add_customer(&state.db, request).await?;
    Ok((StatusCode::CREATED, Json(json!({ "customer_id": customer_id }))))
}

/// `POST /v1/payment`
pub async fn add_payment_method(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<AddPaymentMethod>,
) -> AppResult<(StatusCode, Json<Value>)> {
    request.validate()?;

    let payment_method_id = service::add_payment_method(&state.db, request).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "payment_method_id": payment_method_id })),
    ))
}
