//! # Error Handling Middleware
//!
//! Maps domain errors to HTTP status codes and a `{"error": "..."}` JSON body,
//! so every handler reports failures the same way.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use shelterwalk_core::errors::WalkError;
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping
///
/// Handlers return `Result<_, AppError>` and use `?` on anything that yields
/// a `WalkError`.
#[derive(Debug)]
pub struct AppError(pub WalkError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            WalkError::Validation(_) => StatusCode::BAD_REQUEST,
            WalkError::NotFound(_) => StatusCode::NOT_FOUND,
            WalkError::Conflict(_) => StatusCode::CONFLICT,
            WalkError::IllegalTransition { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            WalkError::ForbiddenTransition { .. } | WalkError::Forbidden(_) => {
                StatusCode::FORBIDDEN
            }
            WalkError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            WalkError::Database(_) | WalkError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = ?self.0, "Request failed");
        }

        let body = Json(json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

impl From<WalkError> for AppError {
    fn from(err: WalkError) -> Self {
        AppError(err)
    }
}

impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(WalkError::Database(err))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError(WalkError::Validation(rejection.body_text()))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError(WalkError::Validation(rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError(WalkError::Validation(rejection.body_text()))
    }
}

/// Maps a WalkError straight to an HTTP response
pub fn map_error(err: WalkError) -> Response {
    AppError(err).into_response()
}
