//! Shared state and plain response types.

use nxlend_sdk::NxlendClient;
use serde::Serialize;
use std::sync::Arc;

use crate::config::ApiConfig;

/// API state shared by every handler
#[derive(Clone)]
pub struct ApiState {
    pub client: Arc<NxlendClient>,
    pub config: Arc<ApiConfig>,
}

impl ApiState {
    pub fn new(client: NxlendClient, config: ApiConfig) -> Self {
        Self {
            client: Arc::new(client),
            config: Arc::new(config),
        }
    }
}

/// Liveness plus the lending deployment this instance builds for.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub program_id: String,
    pub market: String,
    pub checked_at: String,
}
