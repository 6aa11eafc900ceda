use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/schedule/overview", get(handlers::schedule::overview))
        .route("/api/schedule/calendar", get(handlers::schedule::calendar))
}
