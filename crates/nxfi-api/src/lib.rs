//! NxFi Actions API: Solana Actions endpoints for supplying NxLend reserves.

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod config;
pub mod error;
pub mod handlers;
pub mod types;

use config::SUPPLY_ROUTE_PREFIX;
use handlers::*;
pub use types::ApiState;

/// Supply routes, relative to [`SUPPLY_ROUTE_PREFIX`].
pub fn supply_router() -> Router<ApiState> {
    Router::new()
        .route("/{reserve}", get(get_supply).post(post_supply))
        .route(
            "/{reserve}/{amount}",
            get(get_supply_amount).post(post_supply_amount),
        )
}

/// Create API router with all endpoints
pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health_check))
        .route("/actions.json", get(actions_json))
        .nest(SUPPLY_ROUTE_PREFIX, supply_router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
