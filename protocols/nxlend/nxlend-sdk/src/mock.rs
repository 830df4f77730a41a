//! In-memory stand-ins for the cluster and the token registry.
//!
//! Used by the SDK's own tests and by the API tests to drive the deposit flow
//! without network access.

use async_trait::async_trait;
use solana_sdk::{account::Account, hash::Hash, program_pack::Pack, pubkey::Pubkey};
use std::collections::{HashMap, HashSet};

use crate::{
    api::registry::TokenRegistry,
    chain::ChainClient,
    error::NxlendError,
    instructions::{anchor_discriminator, NXLEND_ACCOUNT},
    models::TokenMetadata,
};

/// Size of the serialized `LookupTableMeta` header that precedes the addresses.
const LOOKUP_TABLE_META_SIZE: usize = 56;

/// A ledger held in a `HashMap`.
#[derive(Debug, Clone)]
pub struct MockChain {
    accounts: HashMap<Pubkey, Account>,
    failing: HashSet<Pubkey>,
    blockhash: Option<Hash>,
}

impl Default for MockChain {
    fn default() -> Self {
        Self::new()
    }
}

impl MockChain {
    pub fn new() -> Self {
        Self {
            accounts: HashMap::new(),
            failing: HashSet::new(),
            blockhash: Some(Hash::new_unique()),
        }
    }

    pub fn with_account(mut self, pubkey: Pubkey, account: Account) -> Self {
        self.accounts.insert(pubkey, account);
        self
    }

    /// An initialized SPL token account.
    pub fn with_token_account(self, pubkey: Pubkey) -> Self {
        self.with_account(
            pubkey,
            Account {
                lamports: 2_039_280,
                data: vec![0; spl_token::state::Account::LEN],
                owner: spl_token::ID,
                ..Account::default()
            },
        )
    }

    /// An NxLend user account owned by `program_id`.
    pub fn with_lending_account(self, pubkey: Pubkey, program_id: Pubkey) -> Self {
        let mut data = anchor_discriminator("account", NXLEND_ACCOUNT).to_vec();
        data.resize(256, 0);
        self.with_account(
            pubkey,
            Account {
                lamports: 23_390_000,
                data,
                owner: program_id,
                ..Account::default()
            },
        )
    }

    /// An active address lookup table holding `addresses`.
    pub fn with_lookup_table(self, key: Pubkey, addresses: &[Pubkey]) -> Self {
        self.with_account(
            key,
            Account {
                lamports: 1_000_000,
                data: lookup_table_data(addresses),
                owner: solana_sdk::address_lookup_table::program::ID,
                ..Account::default()
            },
        )
    }

    /// Requests for `pubkey` fail with an RPC error.
    pub fn with_failing_account(mut self, pubkey: Pubkey) -> Self {
        self.failing.insert(pubkey);
        self
    }

    /// `getLatestBlockhash` fails.
    pub fn without_blockhash(mut self) -> Self {
        self.blockhash = None;
        self
    }
}

#[async_trait]
impl ChainClient for MockChain {
    async fn get_latest_blockhash(&self) -> Result<Hash, NxlendError> {
        self.blockhash
            .ok_or_else(|| NxlendError::Rpc("blockhash unavailable".to_string()))
    }

    async fn get_account(&self, pubkey: &Pubkey) -> Result<Option<Account>, NxlendError> {
        if self.failing.contains(pubkey) {
            return Err(NxlendError::Rpc(format!("account {pubkey} unavailable")));
        }
        Ok(self.accounts.get(pubkey).cloned())
    }
}

/// Serializes an active lookup table in the on-chain layout:
/// `ProgramState::LookupTable` tag, `LookupTableMeta`, then raw addresses.
pub fn lookup_table_data(addresses: &[Pubkey]) -> Vec<u8> {
    let mut data = Vec::with_capacity(LOOKUP_TABLE_META_SIZE + addresses.len() * 32);
    data.extend_from_slice(&1u32.to_le_bytes());
    data.extend_from_slice(&u64::MAX.to_le_bytes()); // deactivation_slot
    data.extend_from_slice(&0u64.to_le_bytes()); // last_extended_slot
    data.push(0); // last_extended_slot_start_index
    data.push(1); // authority: Some
    data.extend_from_slice(Pubkey::new_unique().as_ref());
    data.extend_from_slice(&[0u8; 2]);
    for address in addresses {
        data.extend_from_slice(address.as_ref());
    }
    data
}

/// A registry that always serves the same token list.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenRegistry {
    tokens: Vec<TokenMetadata>,
}

impl StaticTokenRegistry {
    pub fn new(tokens: Vec<TokenMetadata>) -> Self {
        Self { tokens }
    }
}

#[async_trait]
impl TokenRegistry for StaticTokenRegistry {
    async fn fetch_tokens(&self) -> Vec<TokenMetadata> {
        self.tokens.clone()
    }
}
