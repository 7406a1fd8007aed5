//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use tracing::debug;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL for a long URL.
///
/// # Endpoint
///
/// `POST /shorten` (requires the `X-Intern-Challenge` header, see
/// [`crate::api::middleware::challenge`])
///
/// # Request Body
///
/// ```json
/// { "longUrl": "https://example.com" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// { "shortCode": "aZ3k95", "shortUrl": "http://localhost:8000/aZ3k95" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request` if the body is not JSON, `longUrl` is missing or empty,
///   the URL is not `http`/`https`, or its domain is blocked
/// - `500 Internal Server Error` if no unique code could be stored
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        debug!("Rejected shorten request body: {}", rejection.body_text());
        AppError::bad_request("Invalid JSON body")
    })?;

    payload.validate()?;

    let long_url = payload
        .long_url
        .ok_or_else(|| AppError::bad_request("longUrl is required"))?;

    let record = state
        .shortening_service
        .create_short_url(&long_url)
        .await?;

    let short_url = state.short_url(&record.short_code);

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            short_code: record.short_code,
            short_url,
        }),
    ))
}
