//! DTOs for link shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a single URL.
///
/// ```json
/// { "longUrl": "https://example.com/some/long/path" }
/// ```
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    /// The original URL. Format and blocklist checks happen in the service;
    /// here it only has to be present and non-empty.
    #[validate(
        required(message = "longUrl is required"),
        length(min = 1, message = "longUrl is required")
    )]
    pub long_url: Option<String>,
}

/// Response for a created short URL.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub short_code: String,
    pub short_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_camel_case() {
        let request: ShortenRequest =
            serde_json::from_str(r#"{"longUrl": "https://example.com"}"#).unwrap();

        assert_eq!(request.long_url.as_deref(), Some("https://example.com"));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_request_requires_long_url() {
        let missing: ShortenRequest = serde_json::from_str("{}").unwrap();
        assert!(missing.validate().is_err());

        let empty: ShortenRequest = serde_json::from_str(r#"{"longUrl": ""}"#).unwrap();
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_response_uses_camel_case() {
        let response = ShortenResponse {
            short_code: "abcde5".to_string(),
            short_url: "http://localhost:8000/abcde5".to_string(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["shortCode"], "abcde5");
        assert_eq!(json["shortUrl"], "http://localhost:8000/abcde5");
    }
}
