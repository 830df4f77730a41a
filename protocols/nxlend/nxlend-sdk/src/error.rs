use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

/// Errors produced while resolving, assembling or packaging an NxLend transaction.
#[derive(Debug, Error)]
pub enum NxlendError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid account address: {0}")]
    InvalidAccount(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid token metadata field `{field}`: {value}")]
    InvalidTokenMetadata { field: &'static str, value: String },
    #[error("Failed to build instruction: {0}")]
    Instruction(String),
    #[error("RPC error: {0}")]
    Rpc(String),
    #[error("Address lookup table {0} not found")]
    LookupTableNotFound(Pubkey),
    #[error("Failed to decode address lookup table {key}: {reason}")]
    LookupTableDecode { key: Pubkey, reason: String },
    #[error("Failed to compile transaction message: {0}")]
    Compile(String),
    #[error("Failed to serialize transaction: {0}")]
    Serialize(#[from] bincode::Error),
}

impl NxlendError {
    /// True when the failure was caused by the caller's input rather than the network.
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidAccount(_) | Self::InvalidAmount(_) | Self::InvalidTokenMetadata { .. }
        )
    }
}
