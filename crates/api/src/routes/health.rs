use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the gateway probe fails.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the persistence gateway answered.
    pub gateway_healthy: bool,
    /// Open WebSocket connections.
    pub ws_connections: usize,
}

/// GET /health -- returns service and gateway health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let gateway_healthy = match state.gateway.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Gateway health probe failed");
            false
        }
    };

    Json(HealthResponse {
        status: if gateway_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        gateway_healthy,
        ws_connections: state.ws_manager.connection_count().await,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
