use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};
use tracing::error;

use crate::AppState;

/// `GET /health`: liveness only, never touches the pool.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// `GET /health/db`: round-trips `SELECT 1` through the invoice store.
/// An unreachable database answers 503 with the same JSON shape.
pub async fn db_health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(&state.db).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "database": "reachable" })),
        ),
        Err(e) => {
            error!("Invoice store unreachable: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "degraded", "database": "unreachable" })),
            )
        }
    }
}
