//! Read-only access to on-chain state.
//!
//! Everything the SDK needs from the cluster goes through [`ChainClient`], so
//! the deposit flow can run against a real RPC node or an in-memory ledger.

use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{account::Account, hash::Hash, pubkey::Pubkey};
use tracing::{debug, warn};

use crate::{
    error::NxlendError,
    instructions::{anchor_discriminator, NXLEND_ACCOUNT},
    models::AccountState,
};

#[async_trait]
pub trait ChainClient: Send + Sync {
    async fn get_latest_blockhash(&self) -> Result<Hash, NxlendError>;

    /// `Ok(None)` when the account does not exist.
    async fn get_account(&self, pubkey: &Pubkey) -> Result<Option<Account>, NxlendError>;
}

#[async_trait]
impl ChainClient for RpcClient {
    async fn get_latest_blockhash(&self) -> Result<Hash, NxlendError> {
        RpcClient::get_latest_blockhash(self)
            .await
            .map_err(|e| NxlendError::Rpc(e.to_string()))
    }

    async fn get_account(&self, pubkey: &Pubkey) -> Result<Option<Account>, NxlendError> {
        let response = self
            .get_account_with_commitment(pubkey, self.commitment())
            .await
            .map_err(|e| NxlendError::Rpc(e.to_string()))?;
        Ok(response.value)
    }
}

/// Existence of the depositor's SPL token account.
pub async fn token_account_state(chain: &dyn ChainClient, address: &Pubkey) -> AccountState {
    account_state(chain, address, |account| account.owner == spl_token::ID).await
}

/// Existence of an initialized NxLend user account.
pub async fn lending_account_state(
    chain: &dyn ChainClient,
    address: &Pubkey,
    program_id: &Pubkey,
) -> AccountState {
    let discriminator = anchor_discriminator("account", NXLEND_ACCOUNT);
    account_state(chain, address, |account| {
        account.owner == *program_id && account.data.starts_with(&discriminator)
    })
    .await
}

async fn account_state<F>(chain: &dyn ChainClient, address: &Pubkey, is_valid: F) -> AccountState
where
    F: Fn(&Account) -> bool,
{
    match chain.get_account(address).await {
        Ok(Some(account)) if is_valid(&account) => AccountState::Exists,
        Ok(Some(account)) => {
            debug!(
                "Account {} exists but is owned by {}; treating it as missing",
                address, account.owner
            );
            AccountState::Missing
        }
        Ok(None) => AccountState::Missing,
        Err(e) => {
            warn!("Existence check for {} failed, assuming missing: {}", address, e);
            AccountState::Missing
        }
    }
}
