//! Invoice management backend: users, customers, payment methods, invoices
//! with line items, and activity logs over a PostgreSQL store.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod service;

use axum::{
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Application state containing shared resources.
///
/// The connection pool is the only shared mutable resource; handlers
/// acquire a connection per query or transaction.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool
    pub db: PgPool,
}

/// Creates the main application router with every `/v1` route.
pub fn create_router(state: AppState) -> Router {
    let v1 = Router::new()
        .route("/user", post(handlers::user::create_user))
        .route("/customer", post(handlers::user::add_customer))
        .route("/payment", post(handlers::user::add_payment_method))
        .route("/invoices", post(handlers::invoice::create_invoice))
        .route("/invoices/activity", post(handlers::activity::add_invoice_activity))
        .route("/invoices/total/:status", get(handlers::invoice::get_total_by_status))
        .route("/invoices/recent/:sender_id", get(handlers::invoice::get_recent_invoices))
        .route("/invoices/:invoice_id", get(handlers::invoice::get_invoice_details))
        .route(
            "/invoices/:invoice_id/activities/:user_id",
            get(handlers::activity::get_invoice_activities),
        )
        .route(
            "/activities/recent/:user_id",
            get(handlers::activity::get_recent_activities),
        );

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/health/db", get(handlers::health::db_health_check))
        .nest("/v1", v1)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
