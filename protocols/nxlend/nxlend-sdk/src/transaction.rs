//! Packaging of instructions into an unsigned v0 transaction.

use base64::{engine::general_purpose::STANDARD, Engine};
use solana_sdk::{
    address_lookup_table::{state::AddressLookupTable, AddressLookupTableAccount},
    hash::Hash,
    instruction::Instruction,
    message::{v0, VersionedMessage},
    pubkey::Pubkey,
    signature::Signature,
    transaction::VersionedTransaction,
};
use tracing::{debug, info};

use crate::{chain::ChainClient, error::NxlendError, models::UnsignedTransaction};

/// Fetches and decodes an address lookup table.
pub async fn fetch_address_lookup_table(
    chain: &dyn ChainClient,
    key: &Pubkey,
) -> Result<AddressLookupTableAccount, NxlendError> {
    let account = chain
        .get_account(key)
        .await?
        .ok_or(NxlendError::LookupTableNotFound(*key))?;
    let table = AddressLookupTable::deserialize(&account.data).map_err(|e| {
        NxlendError::LookupTableDecode {
            key: *key,
            reason: e.to_string(),
        }
    })?;

    Ok(AddressLookupTableAccount {
        key: *key,
        addresses: table.addresses.to_vec(),
    })
}

/// Compiles a v0 message and wraps it with empty signatures.
pub fn compile_unsigned_transaction(
    payer: &Pubkey,
    instructions: &[Instruction],
    lookup_tables: &[AddressLookupTableAccount],
    recent_blockhash: Hash,
) -> Result<VersionedTransaction, NxlendError> {
    let message = v0::Message::try_compile(payer, instructions, lookup_tables, recent_blockhash)
        .map_err(|e| NxlendError::Compile(e.to_string()))?;
    let signatures =
        vec![Signature::default(); usize::from(message.header.num_required_signatures)];

    Ok(VersionedTransaction {
        signatures,
        message: VersionedMessage::V0(message),
    })
}

/// Serializes a transaction in wire format and encodes it as standard base64.
pub fn encode_transaction(transaction: &VersionedTransaction) -> Result<String, NxlendError> {
    let bytes = bincode::serialize(transaction)?;
    Ok(STANDARD.encode(bytes))
}

/// Decodes a base64 wire transaction, the inverse of [`encode_transaction`].
pub fn decode_transaction(encoded: &str) -> Result<VersionedTransaction, NxlendError> {
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|e| NxlendError::Compile(format!("invalid base64: {e}")))?;
    Ok(bincode::deserialize(&bytes)?)
}

/// Fetches the latest blockhash and the lookup table, then compiles and encodes
/// `instructions` as an unsigned transaction paid by `payer`.
///
/// Any RPC failure aborts packaging; nothing is retried.
pub async fn package_transaction(
    chain: &dyn ChainClient,
    payer: &Pubkey,
    instructions: &[Instruction],
    lookup_table: &Pubkey,
) -> Result<UnsignedTransaction, NxlendError> {
    let blockhash = chain.get_latest_blockhash().await?;
    let table = fetch_address_lookup_table(chain, lookup_table).await?;
    debug!(
        "Lookup table {} holds {} addresses",
        table.key,
        table.addresses.len()
    );

    let transaction = compile_unsigned_transaction(payer, instructions, &[table], blockhash)?;
    let base64 = encode_transaction(&transaction)?;
    info!(
        "Packaged {} instructions for {} into a v0 transaction ({} base64 chars)",
        instructions.len(),
        payer,
        base64.len()
    );

    Ok(UnsignedTransaction {
        transaction,
        base64,
    })
}
