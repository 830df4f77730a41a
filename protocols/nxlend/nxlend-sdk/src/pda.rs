use solana_sdk::pubkey::Pubkey;

use crate::{config::NxlendConfig, models::DepositAccounts};

/// Seed prefix of a reserve's liquidity vault.
pub const RESERVE_TOKEN_ACCOUNT_SEED: &[u8] = b"reserve_token_acc_seed";

/// Generate the reserve liquidity vault PDA
/// The vault holds the liquidity supplied to a reserve and is owned by the lending program.
pub fn find_reserve_vault(reserve: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    let seeds: &[&[u8]] = &[RESERVE_TOKEN_ACCOUNT_SEED, reserve.as_ref()];
    Pubkey::find_program_address(seeds, program_id)
}

/// Generate the user's NxLend account PDA
/// One account per (market, owner, seed) tracks the user's deposits and debts.
pub fn find_user_account(
    market: &Pubkey,
    owner: &Pubkey,
    seed: u64,
    program_id: &Pubkey,
) -> (Pubkey, u8) {
    let seed_bytes = seed.to_le_bytes();
    let seeds: &[&[u8]] = &[market.as_ref(), owner.as_ref(), &seed_bytes];
    Pubkey::find_program_address(seeds, program_id)
}

/// Generate associated token account address
pub fn get_associated_token_address(wallet: &Pubkey, mint: &Pubkey) -> Pubkey {
    spl_associated_token_account::get_associated_token_address(wallet, mint)
}

/// Derives every account a deposit into `reserve` by `depositor` needs.
pub fn derive_deposit_accounts(
    config: &NxlendConfig,
    reserve: Pubkey,
    reserve_mint: Pubkey,
    depositor: Pubkey,
) -> DepositAccounts {
    let (reserve_vault, _) = find_reserve_vault(&reserve, &config.program_id);
    let (user_account, _) = find_user_account(
        &config.market,
        &depositor,
        config.user_account_seed,
        &config.program_id,
    );

    DepositAccounts {
        depositor,
        reserve,
        reserve_mint,
        reserve_vault,
        user_account,
        user_token_account: get_associated_token_address(&depositor, &reserve_mint),
    }
}
