use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use validator::ValidationErrors;

use crate::application::services::ShortenError;
use crate::domain::repositories::StoreError;

/// Message returned for every failure the client cannot act on.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Errors surfaced at the HTTP boundary.
///
/// Rendered as `{"error": "<message>"}` with the matching status code.
#[derive(Debug)]
pub enum AppError {
    Validation { message: String },
    Unauthorized { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }
    pub fn internal() -> Self {
        Self::Internal {
            message: INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AppError::Validation { message }
            | AppError::Unauthorized { message }
            | AppError::NotFound { message }
            | AppError::Internal { message } => message,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: match self {
                AppError::Validation { message }
                | AppError::Unauthorized { message }
                | AppError::NotFound { message }
                | AppError::Internal { message } => message,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ShortenError> for AppError {
    fn from(e: ShortenError) -> Self {
        match e {
            ShortenError::Validation(reason) => AppError::bad_request(reason.to_string()),
            ShortenError::GenerationExhausted { attempts } => {
                tracing::error!("Short code generation exhausted after {} attempts", attempts);
                AppError::internal()
            }
            ShortenError::Store(e) => e.into(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        tracing::error!("Store error: {}", e);
        AppError::internal()
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Invalid request".to_string());

        AppError::bad_request(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::ValidationError;

    #[test]
    fn test_validation_error_keeps_reason() {
        let err: AppError = ShortenError::Validation(ValidationError::InvalidFormat).into();

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Invalid URL format");
    }

    #[test]
    fn test_exhaustion_is_opaque() {
        let err: AppError = ShortenError::GenerationExhausted { attempts: 10 }.into();

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), INTERNAL_ERROR_MESSAGE);
    }

    #[test]
    fn test_store_error_is_opaque() {
        let err: AppError = ShortenError::Store(StoreError::Database(sqlx::Error::RowNotFound)).into();

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.message().contains("row"));
    }

    #[test]
    fn test_not_found_status() {
        let err = AppError::not_found("Short URL not found");

        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Short URL not found");
    }
}
