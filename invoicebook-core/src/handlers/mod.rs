pub mod activity;
pub mod health;
pub mod invoice;
pub mod user;


use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON body extractor whose rejections render as `{"error": ...}` with 400.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Query-string extractor with the same `{"error": ...}` rejection shape.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);
