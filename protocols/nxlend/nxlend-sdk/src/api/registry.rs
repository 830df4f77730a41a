//! This module handles all HTTP interactions with the NxLend reserve registry.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use tracing::{debug, warn};

use crate::models::TokenMetadata;

/// A source of reserve token metadata.
#[async_trait]
pub trait TokenRegistry: Send + Sync {
    /// Returns the full token list. Failures yield an empty list.
    async fn fetch_tokens(&self) -> Vec<TokenMetadata>;
}

/// The hosted registry: a JSON array of [`TokenMetadata`] served over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTokenRegistry {
    client: reqwest::Client,
    url: String,
}

impl HttpTokenRegistry {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    async fn try_fetch(&self) -> Result<Vec<TokenMetadata>, reqwest::Error> {
        self.client
            .get(&self.url)
            .header(ACCEPT, "application/json")
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<serde_json::Value>>()
            .await
            .map(|records| decode_records(records, &self.url))
    }
}

/// Decodes each record on its own; a malformed entry is skipped, not fatal.
fn decode_records(records: Vec<serde_json::Value>, url: &str) -> Vec<TokenMetadata> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value(record) {
            Ok(token) => Some(token),
            Err(e) => {
                warn!("Skipping registry record {} from {}: {}", index, url, e);
                None
            }
        })
        .collect()
}

#[async_trait]
impl TokenRegistry for HttpTokenRegistry {
    async fn fetch_tokens(&self) -> Vec<TokenMetadata> {
        match self.try_fetch().await {
            Ok(tokens) => {
                debug!("Fetched {} reserve tokens from {}", tokens.len(), self.url);
                tokens
            }
            Err(e) => {
                warn!("Failed to fetch reserve registry {}: {}", self.url, e);
                Vec::new()
            }
        }
    }
}

/// Finds a token by symbol or address, ignoring case and surrounding whitespace.
pub fn find_token<'a>(tokens: &'a [TokenMetadata], token: &str) -> Option<&'a TokenMetadata> {
    let needle = token.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    tokens.iter().find(|t| {
        t.token_symbol
            .as_deref()
            .is_some_and(|symbol| symbol.to_lowercase() == needle)
            || t.address.to_lowercase() == needle
    })
}

/// Fetches the registry and resolves `token` against it.
///
/// The registry is re-fetched on every call.
pub async fn lookup_token(registry: &dyn TokenRegistry, token: &str) -> Option<TokenMetadata> {
    if token.trim().is_empty() {
        return None;
    }
    let tokens = registry.fetch_tokens().await;
    find_token(&tokens, token).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::StaticTokenRegistry;

    fn token(symbol: Option<&str>, address: &str) -> TokenMetadata {
        TokenMetadata {
            address: address.to_string(),
            reserve_address: "reserve".to_string(),
            decimals: 6,
            name: None,
            token_symbol: symbol.map(str::to_string),
            logo_uri: String::new(),
            token_mint: address.to_string(),
            token_name: String::new(),
            tags: vec![],
        }
    }

    #[test]
    fn matches_symbol_and_address_case_insensitively() {
        let tokens = vec![
            token(Some("USDC"), "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v"),
            token(None, "So11111111111111111111111111111111111111112"),
        ];

        for query in ["usdc", "USDC", "UsDc", "  usdc "] {
            assert_eq!(find_token(&tokens, query), Some(&tokens[0]));
        }
        assert_eq!(
            find_token(&tokens, "epjfwdd5aufqssqem2qn1xzybapc8g4weggkzwytdt1v"),
            Some(&tokens[0])
        );
        assert_eq!(
            find_token(&tokens, "so11111111111111111111111111111111111111112"),
            Some(&tokens[1])
        );
        assert_eq!(find_token(&tokens, "doesnotexist"), None);
        assert_eq!(find_token(&tokens, ""), None);
    }

    #[test]
    fn first_match_wins() {
        let tokens = vec![token(Some("SOL"), "first"), token(Some("sol"), "second")];
        assert_eq!(find_token(&tokens, "sol").map(|t| t.address.as_str()), Some("first"));
    }

    #[test]
    fn malformed_records_are_skipped() {
        let records = vec![
            serde_json::json!({
                "address": "mint-a",
                "reserveAddress": "reserve-a",
                "decimals": 6,
                "tokenSymbol": "AAA",
                "logoURI": null,
                "tokenMint": "mint-a",
                "tokenName": null
            }),
            serde_json::json!({ "address": "mint-b", "decimals": "six" }),
        ];

        let tokens = decode_records(records, "registry");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].token_symbol.as_deref(), Some("AAA"));
        assert_eq!(tokens[0].logo_uri, "");
        assert_eq!(tokens[0].token_name, "");
        assert!(tokens[0].tags.is_empty());
    }

    #[tokio::test]
    async fn empty_registry_finds_nothing() {
        let registry = StaticTokenRegistry::default();
        assert_eq!(lookup_token(&registry, "usdc").await, None);
    }
}
