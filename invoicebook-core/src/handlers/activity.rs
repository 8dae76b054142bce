use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};

use super::{ApiJson, ApiQuery};
use crate::error::AppResult;
use crate::models::{AddInvoiceActivity, InvoiceActivity, RecentActivity};
use crate::pagination::{PageQuery, Pagination};
use crate::service::{self, parse_id};
use crate::AppState;

/// `POST /v1/invoices/activity`
pub async fn add_invoice_activity(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<AddInvoiceActivity>,
) -> AppResult<(StatusCode, Json<Value>)> {
    request.validate()?;

    let activity_id = service::add_invoice_activity(&state.db, request).await?;
    Ok((StatusCode::CREATED, Json(json!({ "activity_id": activity_id }))))
}

/// `GET /v1/activities/recent/:user_id?limit=&page=`
pub async fn get_recent_activities(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> AppResult<Json<Vec<RecentActivity>>> {
    let user_id = parse_id("user id", &user_id)?;

    let activities =
        service::get_recent_activities(&state.db, user_id, Pagination::from(query)).await?;
    Ok(Json(activities))
}

/// `GET /v1/invoices/:invoice_id/activities/:user_id?limit=&page=`
pub async fn get_invoice_activities(
    State(state): State<AppState>,
    Path((invoice_id, user_id)): Path<(String, String)>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> AppResult<Json<Vec<InvoiceActivity>>> {
    let user_id = parse_id("user id", &user_id)?;
    let invoice_id = parse_id("invoice id", &invoice_id)?;

    let activities =
        service::get_invoice_activities(&state.db, user_id, invoice_id, Pagination::from(query))
            .await?;
    Ok(Json(activities))
}
