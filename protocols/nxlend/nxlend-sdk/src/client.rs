use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey};
use std::{str::FromStr, sync::Arc};
use tracing::{debug, info};

use crate::{
    amount::ui_to_native,
    api::registry::{self, HttpTokenRegistry, TokenRegistry},
    chain::{self, ChainClient},
    config::NxlendConfig,
    deposit::{assemble_deposit_instructions, DepositRequest},
    error::NxlendError,
    models::{DepositPlan, TokenMetadata, UnsignedTransaction},
    pda::derive_deposit_accounts,
    transaction,
};

/// The main NxLend client: resolves reserves and builds unsigned deposit transactions.
#[derive(Clone)]
pub struct NxlendClient {
    config: NxlendConfig,
    chain: Arc<dyn ChainClient>,
    registry: Arc<dyn TokenRegistry>,
}

impl NxlendClient {
    /// Creates a client backed by the configured RPC node and hosted registry.
    pub fn new(config: NxlendConfig) -> Self {
        let rpc_client =
            RpcClient::new_with_commitment(config.rpc_url.clone(), CommitmentConfig::confirmed());
        let registry = HttpTokenRegistry::new(config.registry_url.clone());
        Self::with_parts(config, Arc::new(rpc_client), Arc::new(registry))
    }

    /// Creates a client with explicit chain and registry backends.
    pub fn with_parts(
        config: NxlendConfig,
        chain: Arc<dyn ChainClient>,
        registry: Arc<dyn TokenRegistry>,
    ) -> Self {
        Self {
            config,
            chain,
            registry,
        }
    }

    pub fn config(&self) -> &NxlendConfig {
        &self.config
    }

    /// Resolves a reserve token by symbol or address.
    pub async fn lookup_token(&self, token: &str) -> Option<TokenMetadata> {
        registry::lookup_token(self.registry.as_ref(), token).await
    }

    /// Derives accounts, queries their state and assembles the deposit instructions.
    pub async fn prepare_deposit(
        &self,
        token: &TokenMetadata,
        amount: &str,
        depositor: &Pubkey,
    ) -> Result<DepositPlan, NxlendError> {
        let reserve = token.reserve_pubkey()?;
        let reserve_mint = token.mint_pubkey()?;
        let base_amount = ui_to_native(amount, token.decimals)?;

        let accounts = derive_deposit_accounts(&self.config, reserve, reserve_mint, *depositor);
        debug!(
            "Derived deposit accounts: vault={} user_account={} token_account={}",
            accounts.reserve_vault, accounts.user_account, accounts.user_token_account
        );

        let token_account =
            chain::token_account_state(self.chain.as_ref(), &accounts.user_token_account).await;
        let lending_account = chain::lending_account_state(
            self.chain.as_ref(),
            &accounts.user_account,
            &self.config.program_id,
        )
        .await;
        debug!(
            "Account state: token_account={:?} lending_account={:?}",
            token_account, lending_account
        );

        let instructions = assemble_deposit_instructions(&DepositRequest {
            program_id: &self.config.program_id,
            market: &self.config.market,
            accounts: &accounts,
            base_amount,
            is_native: token.is_native(),
            sol_wrap_factor: self.config.sol_wrap_factor,
            user_account_seed: self.config.user_account_seed,
            lending_account,
        })?;

        Ok(DepositPlan {
            accounts,
            base_amount,
            token_account,
            lending_account,
            instructions,
        })
    }

    /// Builds an unsigned deposit transaction for `account`, ready to be signed by a wallet.
    pub async fn deposit(
        &self,
        token: &TokenMetadata,
        amount: &str,
        account: &str,
    ) -> Result<UnsignedTransaction, NxlendError> {
        let depositor = Pubkey::from_str(account.trim())
            .map_err(|_| NxlendError::InvalidAccount(account.to_string()))?;

        let plan = self.prepare_deposit(token, amount, &depositor).await?;
        info!(
            "Depositing {} base units of {} for {} ({} instructions)",
            plan.base_amount,
            token.display_symbol(),
            depositor,
            plan.instructions.len()
        );

        transaction::package_transaction(
            self.chain.as_ref(),
            &depositor,
            &plan.instructions,
            &self.config.lookup_table,
        )
        .await
    }
}
