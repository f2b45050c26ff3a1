//! Liveness probe.

use axum::Json;

use crate::dto::HealthResponse;

/// Report that the server is up.
pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
