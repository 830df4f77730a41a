use serde::{Deserialize, Deserializer, Serialize};
use solana_sdk::{instruction::Instruction, pubkey::Pubkey, transaction::VersionedTransaction};
use std::str::FromStr;

use crate::error::NxlendError;

// --- Registry Data Structures ---

/// A reserve token as published by the NxLend registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenMetadata {
    pub address: String,
    pub reserve_address: String,
    pub decimals: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_symbol: Option<String>,
    #[serde(rename = "logoURI", default, deserialize_with = "null_as_default")]
    pub logo_uri: String,
    pub token_mint: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub token_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
}

/// Display-only fields are sometimes published as `null`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl TokenMetadata {
    /// Symbol used in action labels, falling back to the token name.
    pub fn display_symbol(&self) -> &str {
        self.token_symbol
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or(&self.token_name)
    }

    pub fn reserve_pubkey(&self) -> Result<Pubkey, NxlendError> {
        parse_metadata_pubkey("reserveAddress", &self.reserve_address)
    }

    pub fn mint_pubkey(&self) -> Result<Pubkey, NxlendError> {
        parse_metadata_pubkey("tokenMint", &self.token_mint)
    }

    /// Whether the reserve asset is wrapped SOL.
    pub fn is_native(&self) -> bool {
        self.token_mint == spl_token::native_mint::ID.to_string()
    }
}

fn parse_metadata_pubkey(field: &'static str, value: &str) -> Result<Pubkey, NxlendError> {
    Pubkey::from_str(value).map_err(|_| NxlendError::InvalidTokenMetadata {
        field,
        value: value.to_string(),
    })
}

// --- Derived Accounts ---

/// The program-owned and associated accounts touched by a deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepositAccounts {
    pub depositor: Pubkey,
    pub reserve: Pubkey,
    pub reserve_mint: Pubkey,
    /// Reserve liquidity vault PDA
    pub reserve_vault: Pubkey,
    /// Depositor's NxLend account PDA
    pub user_account: Pubkey,
    /// Depositor's associated token account for the reserve mint
    pub user_token_account: Pubkey,
}

/// Result of an explicit on-chain existence query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountState {
    Exists,
    Missing,
}

impl AccountState {
    pub fn exists(self) -> bool {
        self == Self::Exists
    }
}

/// Fully assembled deposit, before transaction packaging.
#[derive(Debug, Clone)]
pub struct DepositPlan {
    pub accounts: DepositAccounts,
    /// Deposit amount in the token's base units
    pub base_amount: u64,
    pub token_account: AccountState,
    pub lending_account: AccountState,
    pub instructions: Vec<Instruction>,
}

// --- Production Output Structs ---

/// Represents an unsigned transaction ready to be sent to a wallet for signing.
#[derive(Debug, Clone)]
pub struct UnsignedTransaction {
    /// The unsigned, versioned transaction.
    pub transaction: VersionedTransaction,
    /// Base64 encoding of the serialized transaction.
    pub base64: String,
}
