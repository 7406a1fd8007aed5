//! API route configuration.

use crate::api::handlers::{health_handler, redirect_handler, shorten_handler};
use crate::api::middleware::challenge;
use crate::state::AppState;
use axum::{
    Router, middleware,
    routing::{get, post},
};

/// Routes that require the `X-Intern-Challenge` header.
///
/// # Endpoints
///
/// - `POST /shorten` - Create a short URL
pub fn gated_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route_layer(middleware::from_fn(challenge::layer))
}

/// Routes open to everyone.
///
/// # Endpoints
///
/// - `GET /health` - Database health check
/// - `GET /{code}` - Redirect to the stored URL
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
}
