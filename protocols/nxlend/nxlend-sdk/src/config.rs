//! Runtime configuration for the NxLend SDK.
//!
//! Values are read through `dotenvy`, so a `.env` file in the working directory
//! is honored alongside the process environment.

use rust_decimal::Decimal;
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

use crate::error::NxlendError;

pub const DEFAULT_RPC_URL: &str = "https://api.mainnet-beta.solana.com";

/// Fraction of extra lamports moved into the wSOL account when wrapping (0.001).
pub fn default_sol_wrap_factor() -> Decimal {
    Decimal::new(1, 3)
}

/// Seed of the per-user lending account, encoded as a little-endian u64.
pub const DEFAULT_USER_ACCOUNT_SEED: u64 = 50;

/// Everything the SDK needs to talk to the network and the lending program.
#[derive(Debug, Clone)]
pub struct NxlendConfig {
    /// Solana RPC endpoint URL
    pub rpc_url: String,
    /// NxLend lending program
    pub program_id: Pubkey,
    /// NxLend market account
    pub market: Pubkey,
    /// Address lookup table used to compress deposit transactions
    pub lookup_table: Pubkey,
    /// URL of the hosted reserve token registry
    pub registry_url: String,
    pub sol_wrap_factor: Decimal,
    pub user_account_seed: u64,
}

impl NxlendConfig {
    pub fn new(
        rpc_url: impl Into<String>,
        program_id: Pubkey,
        market: Pubkey,
        lookup_table: Pubkey,
        registry_url: impl Into<String>,
    ) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            program_id,
            market,
            lookup_table,
            registry_url: registry_url.into(),
            sol_wrap_factor: default_sol_wrap_factor(),
            user_account_seed: DEFAULT_USER_ACCOUNT_SEED,
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, NxlendError> {
        let rpc_url = dotenvy::var("SOLANA_RPC_URL").unwrap_or_else(|_| DEFAULT_RPC_URL.to_string());
        let program_id = required_pubkey("NXLEND_PROGRAM_ID")?;
        let market = required_pubkey("NXLEND_MARKET")?;
        let lookup_table = required_pubkey("NXLEND_LOOKUP_TABLE")?;
        let registry_url = required_var("NXLEND_RESERVE_REGISTRY_URL")?;

        let mut config = Self::new(rpc_url, program_id, market, lookup_table, registry_url);

        if let Ok(factor) = dotenvy::var("NXLEND_SOL_WRAP_FACTOR") {
            config.sol_wrap_factor = Decimal::from_str(factor.trim()).map_err(|e| {
                NxlendError::Config(format!("NXLEND_SOL_WRAP_FACTOR is not a decimal: {e}"))
            })?;
        }
        if let Ok(seed) = dotenvy::var("NXLEND_USER_ACCOUNT_SEED") {
            config.user_account_seed = seed.trim().parse().map_err(|e| {
                NxlendError::Config(format!("NXLEND_USER_ACCOUNT_SEED is not a u64: {e}"))
            })?;
        }

        Ok(config)
    }
}

fn required_var(key: &str) -> Result<String, NxlendError> {
    dotenvy::var(key).map_err(|_| NxlendError::Config(format!("{key} must be set")))
}

fn required_pubkey(key: &str) -> Result<Pubkey, NxlendError> {
    let value = required_var(key)?;
    Pubkey::from_str(value.trim())
        .map_err(|e| NxlendError::Config(format!("{key} is not a valid pubkey: {e}")))
}
