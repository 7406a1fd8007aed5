//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /shorten` - Create a short URL (`X-Intern-Challenge` required)
//! - `GET  /health`  - Health check (public)
//! - `GET  /{code}`  - Short link redirect (public)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Browser access from the configured origin
//! - **Panic recovery** - Panics become `500` JSON errors
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::middleware::{cors, panic, tracing};
use crate::state::AppState;
use axum::Router;
use tower::Layer;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the router with all routes and middleware, without path
/// normalization. Used directly by tests.
pub fn api_router(state: AppState, cors_allow_origin: &str) -> Router {
    Router::new()
        .merge(api::routes::gated_routes())
        .merge(api::routes::public_routes())
        .with_state(state)
        .layer(CatchPanicLayer::custom(panic::handle_panic))
        .layer(cors::layer(cors_allow_origin))
        .layer(tracing::layer())
}

/// Constructs the application router served by [`crate::server::run`].
pub fn app_router(state: AppState, cors_allow_origin: &str) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(api_router(state, cors_allow_origin))
}
