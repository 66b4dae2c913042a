//! Handler for health check.

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Returns service liveness.
///
/// # Endpoint
///
/// `GET /health`
///
/// Reports degraded (503) when the resolution event channel has closed,
/// which means the count worker died and hit counting has stopped.
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let version = env!("CARGO_PKG_VERSION").to_string();

    if state.event_tx.is_closed() {
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "degraded".to_string(),
                version,
            }),
        ));
    }

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version,
    }))
}
