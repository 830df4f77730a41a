//! Assembly of the deposit instruction sequence.

use rust_decimal::Decimal;
use solana_sdk::{instruction::Instruction, pubkey::Pubkey};

use crate::{
    amount::wrap_lamports,
    error::NxlendError,
    instructions::{
        create_user_account, deposit_into_reserve, unwrap_sol_instruction, wrap_sol_instructions,
    },
    models::{AccountState, DepositAccounts},
};

/// Inputs that shape the instruction list.
#[derive(Debug, Clone, Copy)]
pub struct DepositRequest<'a> {
    pub program_id: &'a Pubkey,
    pub market: &'a Pubkey,
    pub accounts: &'a DepositAccounts,
    pub base_amount: u64,
    pub is_native: bool,
    pub sol_wrap_factor: Decimal,
    pub user_account_seed: u64,
    pub lending_account: AccountState,
}

/// Builds, in order:
///
/// 1. `create_user_account` when the lending account is missing,
/// 2. the wrap cycle when the reserve asset is native SOL,
/// 3. `deposit_into_reserve`,
/// 4. the unwrap that closes the wSOL account, for native SOL only.
pub fn assemble_deposit_instructions(
    request: &DepositRequest<'_>,
) -> Result<Vec<Instruction>, NxlendError> {
    let accounts = request.accounts;
    let depositor = &accounts.depositor;
    let deposit_ix = deposit_into_reserve(
        request.program_id,
        request.market,
        accounts,
        request.base_amount,
    );

    let mut instructions = Vec::new();

    if !request.lending_account.exists() {
        instructions.push(create_user_account(
            request.program_id,
            request.market,
            &accounts.user_account,
            depositor,
            request.user_account_seed,
        ));
    }

    if request.is_native {
        let lamports = wrap_lamports(request.base_amount, request.sol_wrap_factor)?;
        instructions.extend(wrap_sol_instructions(depositor, lamports)?);
        instructions.push(deposit_ix);
        instructions.push(unwrap_sol_instruction(depositor)?);
    } else {
        instructions.push(deposit_ix);
    }

    Ok(instructions)
}
