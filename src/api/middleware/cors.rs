//! Cross-origin policy for the browser form.

use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use super::challenge::CHALLENGE_HEADER;

/// Creates the CORS layer.
///
/// Allows `GET`, `POST` and `OPTIONS` with the `Content-Type` and
/// `X-Intern-Challenge` request headers. `allow_origin` is either `*` or a
/// single exact origin such as `https://app.example.com`; an unparsable
/// value falls back to `*`.
pub fn layer(allow_origin: &str) -> CorsLayer {
    let origin = if allow_origin == "*" {
        AllowOrigin::from(Any)
    } else {
        match HeaderValue::from_str(allow_origin) {
            Ok(value) => AllowOrigin::exact(value),
            Err(e) => {
                tracing::warn!(
                    "Invalid CORS origin '{}' ({}), allowing any origin",
                    allow_origin,
                    e
                );
                AllowOrigin::from(Any)
            }
        }
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(CHALLENGE_HEADER)])
}
