//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{
    ComponentCheck, ComponentStatus, HealthChecks, HealthResponse, ServiceStatus,
};
use crate::state::AppState;

/// Returns service health status.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: database reachable
/// - **503 Service Unavailable**: database probe failed
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": { "database": { "status": "ok" } }
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = if state.shortening_service.health_check().await {
        ComponentCheck {
            status: ComponentStatus::Ok,
            message: None,
        }
    } else {
        ComponentCheck {
            status: ComponentStatus::Error,
            message: Some("Database query failed".to_string()),
        }
    };

    let healthy = database.status == ComponentStatus::Ok;

    let response = HealthResponse {
        status: if healthy {
            ServiceStatus::Healthy
        } else {
            ServiceStatus::Degraded
        },
        version: env!("CARGO_PKG_VERSION"),
        checks: HealthChecks { database },
    };

    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
