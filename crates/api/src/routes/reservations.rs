use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/reservations",
            get(handlers::reservations::list_requests)
                .post(handlers::reservations::create_request),
        )
        .route(
            "/api/reservations/:id",
            get(handlers::reservations::get_request)
                .delete(handlers::reservations::delete_request),
        )
        .route(
            "/api/reservations/:id/status",
            put(handlers::reservations::set_status),
        )
        .route(
            "/api/reservations/:id/transitions",
            get(handlers::reservations::available_transitions),
        )
}
