//! Shared fixtures for the API integration tests.
#![allow(dead_code)]

use anyhow::Result;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use nxfi_api::{config::ApiConfig, create_router, ApiState};
use nxlend_sdk::{
    mock::{MockChain, StaticTokenRegistry},
    NxlendClient, NxlendConfig, TokenMetadata,
};
use serde_json::Value;
use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;
use tower::ServiceExt;

pub struct TestApp {
    pub config: NxlendConfig,
    pub usdc: TokenMetadata,
    pub sol: TokenMetadata,
}

impl TestApp {
    pub fn new() -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("info,nxfi_api=debug,nxlend_sdk=debug")
            .try_init();

        let config = NxlendConfig::new(
            "http://127.0.0.1:8899",
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            "http://127.0.0.1/reserves.json",
        );
        let usdc_mint = Pubkey::new_unique();
        let usdc = TokenMetadata {
            address: usdc_mint.to_string(),
            reserve_address: Pubkey::new_unique().to_string(),
            decimals: 6,
            name: Some("USD Coin".to_string()),
            token_symbol: Some("USDC".to_string()),
            logo_uri: String::new(),
            token_mint: usdc_mint.to_string(),
            token_name: "USD Coin".to_string(),
            tags: vec![],
        };
        let sol = TokenMetadata {
            address: spl_token::native_mint::ID.to_string(),
            reserve_address: Pubkey::new_unique().to_string(),
            decimals: 9,
            name: None,
            token_symbol: Some("SOL".to_string()),
            logo_uri: String::new(),
            token_mint: spl_token::native_mint::ID.to_string(),
            token_name: "Wrapped SOL".to_string(),
            tags: vec![],
        };
        Self { config, usdc, sol }
    }

    /// A ledger holding only the lookup table.
    pub fn chain(&self) -> MockChain {
        MockChain::new().with_lookup_table(
            self.config.lookup_table,
            &[spl_token::ID, self.config.market],
        )
    }

    pub fn router(&self, chain: MockChain) -> Router {
        let client = NxlendClient::with_parts(
            self.config.clone(),
            Arc::new(chain),
            Arc::new(StaticTokenRegistry::new(vec![
                self.usdc.clone(),
                self.sol.clone(),
            ])),
        );
        create_router(ApiState::new(client, ApiConfig::default()))
    }
}

pub async fn get(app: Router, uri: &str) -> Result<(StatusCode, Value)> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())?;
    send(app, request).await
}

pub async fn post(app: Router, uri: &str, body: Value) -> Result<(StatusCode, Value)> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))?;
    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> Result<(StatusCode, Value)> {
    let response = app.oneshot(request).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, value))
}
