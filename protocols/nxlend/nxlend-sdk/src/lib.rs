//! # nxlend-sdk
//!
//! A Rust SDK for building NxLend lending transactions.
//! This SDK resolves reserve tokens from the hosted NxLend registry, derives the
//! program accounts a deposit touches, and packages the resulting instructions
//! into an unsigned v0 transaction ready to be signed by a wallet.

pub mod amount;
pub mod api;
pub mod chain;
pub mod client;
pub mod config;
pub mod deposit;
pub mod error;
pub mod instructions;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod models;
pub mod pda;
pub mod transaction;

// Re-export key structs and the main client for easier access.
pub use client::NxlendClient;
pub use config::NxlendConfig;
pub use error::NxlendError;
pub use models::{AccountState, DepositAccounts, DepositPlan, TokenMetadata, UnsignedTransaction};
