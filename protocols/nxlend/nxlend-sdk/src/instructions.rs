//! Instruction builders for the NxLend program and the wSOL wrap cycle.
//!
//! NxLend is an Anchor program: instruction data is the 8-byte
//! `sha256("global:<name>")` discriminator followed by the borsh-encoded
//! arguments, and accounts are passed in the order the program declares them.

use solana_sdk::{
    hash::hashv,
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};
use solana_system_interface::instruction as system_instruction;

use crate::{error::NxlendError, models::DepositAccounts};

pub const DEPOSIT_INTO_RESERVE: &str = "deposit_into_reserve";
pub const CREATE_USER_ACCOUNT: &str = "create_user_account";
pub const NXLEND_ACCOUNT: &str = "NxlendAccount";

/// First 8 bytes of `sha256("<namespace>:<name>")`.
pub fn anchor_discriminator(namespace: &str, name: &str) -> [u8; 8] {
    let preimage = format!("{namespace}:{name}");
    let hash = hashv(&[preimage.as_bytes()]);
    let mut discriminator = [0u8; 8];
    discriminator.copy_from_slice(&hash.as_ref()[..8]);
    discriminator
}

fn anchor_data(name: &str, arg: u64) -> Vec<u8> {
    let mut data = Vec::with_capacity(16);
    data.extend_from_slice(&anchor_discriminator("global", name));
    data.extend_from_slice(&arg.to_le_bytes());
    data
}

/// `deposit_into_reserve(amount)`: moves `amount` base units from the signer's
/// token account into the reserve vault.
pub fn deposit_into_reserve(
    program_id: &Pubkey,
    market: &Pubkey,
    accounts: &DepositAccounts,
    amount: u64,
) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*market, false),
            AccountMeta::new(accounts.user_account, false),
            AccountMeta::new(accounts.depositor, true),
            AccountMeta::new(accounts.reserve, false),
            AccountMeta::new(accounts.user_token_account, false),
            AccountMeta::new(accounts.reserve_vault, false),
            AccountMeta::new_readonly(spl_token::ID, false),
        ],
        data: anchor_data(DEPOSIT_INTO_RESERVE, amount),
    }
}

/// `create_user_account(seed)`: opens the owner's NxLend account, paid by the owner.
pub fn create_user_account(
    program_id: &Pubkey,
    market: &Pubkey,
    user_account: &Pubkey,
    owner: &Pubkey,
    seed: u64,
) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*market, false),
            AccountMeta::new(*user_account, false),
            AccountMeta::new_readonly(*owner, true),
            AccountMeta::new(*owner, true),
            AccountMeta::new_readonly(solana_system_interface::program::ID, false),
        ],
        data: anchor_data(CREATE_USER_ACCOUNT, seed),
    }
}

/// Instructions that move `lamports` of native SOL into the owner's wSOL account.
///
/// The ATA creation is idempotent. When `lamports` is zero only the account is
/// created.
pub fn wrap_sol_instructions(owner: &Pubkey, lamports: u64) -> Result<Vec<Instruction>, NxlendError> {
    let wsol_mint = spl_token::native_mint::ID;
    let wsol_ata = spl_associated_token_account::get_associated_token_address(owner, &wsol_mint);

    let mut instructions = vec![
        spl_associated_token_account::instruction::create_associated_token_account_idempotent(
            owner,
            owner,
            &wsol_mint,
            &spl_token::ID,
        ),
    ];

    if lamports > 0 {
        instructions.push(system_instruction::transfer(owner, &wsol_ata, lamports));
        instructions.push(
            spl_token::instruction::sync_native(&spl_token::ID, &wsol_ata)
                .map_err(|e| NxlendError::Instruction(e.to_string()))?,
        );
    }

    Ok(instructions)
}

/// Closes the owner's wSOL account, returning any remaining lamports to the owner.
pub fn unwrap_sol_instruction(owner: &Pubkey) -> Result<Instruction, NxlendError> {
    let wsol_ata =
        spl_associated_token_account::get_associated_token_address(owner, &spl_token::native_mint::ID);
    spl_token::instruction::close_account(&spl_token::ID, &wsol_ata, owner, owner, &[])
        .map_err(|e| NxlendError::Instruction(e.to_string()))
}
