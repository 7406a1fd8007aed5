//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::{debug, error};
use url::Url;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// No header gate applies; any path segment is treated as a lookup key.
///
/// # Response
///
/// `302 Found` with `Location` set to the stored URL, byte for byte when it
/// is a legal header value.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let long_url = state
        .shortening_service
        .get_long_url(&code)
        .await?
        .ok_or_else(|| {
            debug!("No URL stored for code '{}'", code);
            AppError::not_found("Short URL not found")
        })?;

    let location = location_header(&long_url).ok_or_else(|| {
        error!("Stored URL for '{}' is not a valid Location header", code);
        AppError::internal()
    })?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

/// Builds the `Location` value for a stored URL.
///
/// The stored string is used unchanged when it is a legal header value.
/// Otherwise it is re-serialized by the URL parser, which drops tab and
/// newline characters and percent-encodes the rest, matching what
/// validation accepted.
fn location_header(long_url: &str) -> Option<HeaderValue> {
    HeaderValue::from_str(long_url).ok().or_else(|| {
        let parsed = Url::parse(long_url).ok()?;
        HeaderValue::from_str(parsed.as_str()).ok()
    })
}
