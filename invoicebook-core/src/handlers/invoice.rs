use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};
use tracing::info;

use super::{ApiJson, ApiQuery};
use crate::error::AppResult;
use crate::models::{CreateInvoice, Invoice, InvoiceDetails, InvoiceStatus, StatusTotal};
use crate::pagination::{PageQuery, Pagination};
use crate::service::{self, parse_id};
use crate::AppState;

/// `POST /v1/invoices`
pub async fn create_invoice(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateInvoice>,
) -> AppResult<(StatusCode, Json<Value>)> {
    info!(
        "Create invoice request from sender {} with {} items",
        request.invoice.sender_id,
        request.invoice_items.len()
    );

    let invoice_id = service::create_invoice(&state.db, request).await?;
    Ok((StatusCode::CREATED, Json(json!({ "invoice_id": invoice_id }))))
}

/// `GET /v1/invoices/:invoice_id`
pub async fn get_invoice_details(
    State(state): State<AppState>,
    Path(invoice_id): Path<String>,
) -> AppResult<Json<InvoiceDetails>> {
    let invoice_id = parse_id("invoice id", &invoice_id)?;

    let details = service::get_invoice_details(&state.db, invoice_id).await?;
    Ok(Json(details))
}

/// `GET /v1/invoices/total/:status`
pub async fn get_total_by_status(
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> AppResult<Json<StatusTotal>> {
    let status: InvoiceStatus = status.parse()?;

    let total = service::get_total_by_status(&state.db, status).await?;
    Ok(Json(total))
}

/// `GET /v1/invoices/recent/:sender_id?limit=&page=`
pub async fn get_recent_invoices(
    State(state): State<AppState>,
    Path(sender_id): Path<String>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> AppResult<Json<Vec<Invoice>>> {
    let sender_id = parse_id("sender id", &sender_id)?;

    let invoices = service::get_recent_invoices(&state.db, sender_id, Pagination::from(query)).await?;
    Ok(Json(invoices))
}
