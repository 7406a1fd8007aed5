//! Converts handler panics into opaque 500 responses.

use std::any::Any;

use axum::response::{IntoResponse, Response};

use crate::error::AppError;

/// Panic handler for `tower_http::catch_panic::CatchPanicLayer::custom`.
///
/// Logs the panic payload and answers with the generic
/// `{"error": "Internal server error"}` body.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };

    tracing::error!("Request handler panicked: {}", detail);

    AppError::internal().into_response()
}
