//! Readiness endpoint.

use axum::Json;

use crate::models::HealthResponse;

/// `GET /`: static readiness payload.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        status: "ready".to_string(),
    })
}
