//! # Shelter walk API
//!
//! HTTP surface of the walk scheduling engine: slot publishing, reservation
//! requests and their status workflow, and the schedule views.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Apply role gates and call the engine services
//! - **Middleware**: Actor extraction and error mapping
//! - **Config**: Environment configuration
//!
//! The crate is storage-agnostic; callers hand [`start_server`] a
//! [`Scheduler`] wired to whichever backend they chose.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Actor extraction and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    error_handling::HandleErrorLayer,
    http::{header, Method, StatusCode},
    BoxError, Json, Router,
};
use eyre::Result;
use serde_json::{json, Value};
use shelterwalk_core::services::Scheduler;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use middleware::auth::{ACTOR_ID_HEADER, ACTOR_ROLE_HEADER};

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    pub scheduler: Scheduler,
}

/// Builds the router with every route and the shared state attached.
///
/// Layers that depend on configuration (CORS, timeouts) are added by
/// [`start_server`], so tests can drive this router directly.
pub fn app(scheduler: Scheduler) -> Router {
    let state = Arc::new(ApiState { scheduler });

    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Slot publishing
        .merge(routes::slots::routes())
        // Reservation requests and their workflow
        .merge(routes::reservations::routes())
        // Overview and calendar
        .merge(routes::schedule::routes())
        .with_state(state)
}

/// Starts the API server with the provided configuration and scheduler
///
/// Installs the global tracing subscriber, applies CORS and the request
/// timeout, then serves until the listener fails.
pub async fn start_server(config: config::ApiConfig, scheduler: Scheduler) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let app = app(scheduler).layer(TraceLayer::new_for_http());

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let cors = CorsLayer::new()
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([
                header::CONTENT_TYPE,
                header::ACCEPT,
                header::HeaderName::from_static(ACTOR_ID_HEADER),
                header::HeaderName::from_static(ACTOR_ROLE_HEADER),
            ])
            .allow_origin(origins.clone())
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware
    let app = app.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_timeout))
            .timeout(Duration::from_secs(config.request_timeout)),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn handle_timeout(err: BoxError) -> (StatusCode, Json<Value>) {
    if err.is::<tower::timeout::error::Elapsed>() {
        (
            StatusCode::REQUEST_TIMEOUT,
            Json(json!({ "error": "Request timed out" })),
        )
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("Unhandled internal error: {}", err) })),
        )
    }
}
