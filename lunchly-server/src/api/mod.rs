//! API routes
//!
//! - [`health`] - health check
//! - [`customers`] - customer list / search / detail / edit, reservation booking
//! - [`reservations`] - reservation lookup and edit

pub mod convert;

pub mod customers;
pub mod health;
pub mod reservations;

use axum::{Router, middleware};
use tower_http::cors::CorsLayer;

use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};

/// HTTP access log middleware
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    tracing::info!(target: "http_access", "{} {} {}", method, uri, response.status());

    response
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(customers::router())
        .merge(reservations::router())
}

/// Build the fully configured application (CORS, access log, state)
pub fn build_app(state: ServerState) -> Router {
    build_router()
        .with_state(state)
        // CORS - Handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Request logging
        .layer(middleware::from_fn(log_request))
}
