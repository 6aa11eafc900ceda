//! # Input extractors
//!
//! `Json`, `Path` and `Query` with their rejections routed through
//! [`AppError`], so a malformed body, path or query string answers
//! `400 Bad Request` with the usual `{"error": "..."}` body.

use axum::extract::{FromRequest, FromRequestParts};

use super::error_handling::AppError;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct Json<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct Path<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct Query<T>(pub T);
