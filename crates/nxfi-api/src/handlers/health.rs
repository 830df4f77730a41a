use axum::{extract::State, response::Json};

use crate::types::{ApiState, HealthResponse};

/// `GET /api/v1/health`. Answers without touching the RPC node or the registry.
pub async fn health_check(State(state): State<ApiState>) -> Json<HealthResponse> {
    let config = state.client.config();
    Json(HealthResponse {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        program_id: config.program_id.to_string(),
        market: config.market.to_string(),
        checked_at: chrono::Utc::now().to_rfc3339(),
    })
}
