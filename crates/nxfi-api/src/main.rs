use anyhow::Result;
use nxfi_api::{config::ApiConfig, create_router, ApiState};
use nxlend_sdk::{NxlendClient, NxlendConfig};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nxfi_api=debug,nxlend_sdk=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let nxlend_config = NxlendConfig::from_env()?;
    info!(
        "NxLend program {} market {} via {}",
        nxlend_config.program_id, nxlend_config.market, nxlend_config.rpc_url
    );
    let api_config = ApiConfig::from_env()?;
    let port = api_config.port;

    let state = ApiState::new(NxlendClient::new(nxlend_config), api_config);
    let app = create_router(state);

    let addr = format!("0.0.0.0:{port}");
    info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("API server listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
