//! Conversions between human-entered amounts and token base units.

use rust_decimal::{prelude::ToPrimitive, Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::error::NxlendError;

/// Converts a decimal amount string into base units, rounding up.
///
/// `"1.0000001"` at 6 decimals becomes `1000001`: fractional dust is always
/// rounded towards the larger base amount.
pub fn ui_to_native(amount: &str, decimals: u8) -> Result<u64, NxlendError> {
    let invalid = || NxlendError::InvalidAmount(amount.to_string());

    let trimmed = amount.trim();
    let value = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| invalid())?;
    if !is_exact(trimmed) {
        return Err(invalid());
    }
    if value.is_sign_negative() && !value.is_zero() {
        return Err(invalid());
    }

    let scale = 10u64
        .checked_pow(u32::from(decimals))
        .map(Decimal::from)
        .ok_or_else(invalid)?;

    value
        .checked_mul(scale)
        .map(|scaled| scaled.ceil())
        .and_then(|scaled| scaled.to_u64())
        .ok_or_else(invalid)
}

/// Whether the mantissa of `amount` parses without losing digits.
///
/// `Decimal` holds at most 28 fractional digits and silently rounds input past
/// that, which could turn a ceiling into a floor.
fn is_exact(amount: &str) -> bool {
    let mantissa = amount.split(['e', 'E']).next().unwrap_or(amount);
    let significant = match mantissa.split_once('.') {
        Some((_, fraction)) => fraction.trim_end_matches('0').len(),
        None => 0,
    };
    Decimal::from_str(mantissa)
        .map(|m| m.normalize().scale() as usize == significant)
        .unwrap_or(false)
}

/// Lamports moved into the wSOL account: `amount × (1 + factor)`, rounded to
/// the nearest lamport.
pub fn wrap_lamports(amount: u64, factor: Decimal) -> Result<u64, NxlendError> {
    Decimal::from(amount)
        .checked_mul(Decimal::ONE + factor)
        .map(|v| v.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|v| v.to_u64())
        .ok_or_else(|| NxlendError::InvalidAmount(amount.to_string()))
}
