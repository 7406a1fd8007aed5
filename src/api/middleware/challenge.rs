//! Static header gate for write endpoints.

use axum::{extract::Request, middleware::Next, response::Response};

use crate::error::AppError;

/// Header that must accompany every shorten request.
pub const CHALLENGE_HEADER: &str = "x-intern-challenge";

/// Rejects requests that lack a non-empty `X-Intern-Challenge` header.
///
/// The header value is not checked against anything; only its presence
/// matters. Surrounding whitespace is ignored, so a blank value counts as
/// missing.
///
/// # Errors
///
/// Returns `401 Unauthorized` with
/// `{"error": "Unauthorized: Missing X-Intern-Challenge header"}`.
///
/// # Example
///
/// ```rust,ignore
/// let gated = Router::new()
///     .route("/shorten", post(shorten_handler))
///     .route_layer(middleware::from_fn(challenge::layer));
/// ```
pub async fn layer(req: Request, next: Next) -> Result<Response, AppError> {
    let present = req
        .headers()
        .get(CHALLENGE_HEADER)
        .is_some_and(|value| !value.as_bytes().trim_ascii().is_empty());

    if !present {
        return Err(AppError::unauthorized(
            "Unauthorized: Missing X-Intern-Challenge header",
        ));
    }

    Ok(next.run(req).await)
}
