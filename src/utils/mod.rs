//! Utility functions and helpers

pub mod address;
pub mod hash;

use crate::constants::{TOKEN_DECIMALS, TOKEN_DECIMALS_HELPER};
use crate::errors::{ClientError, ClientResult};

/// Convert a decimal UI amount (whole tokens, e.g. `"8.2"`) into raw base units.
///
/// Digits past the token decimals are truncated. Signs, exponents and
/// anything but ASCII digits with at most one `.` are rejected.
pub fn to_raw_amount(amount: &str) -> ClientResult<u64> {
    let invalid = |reason: &str| ClientError::InvalidAmount(format!("{:?} {}", amount, reason));

    let trimmed = amount.trim();
    let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid("is not a number"));
    }
    let is_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if !is_digits(whole) || !is_digits(fraction) {
        return Err(invalid("is not a non-negative decimal number"));
    }

    let decimals = usize::from(TOKEN_DECIMALS);
    let fraction = &fraction[..fraction.len().min(decimals)];

    let whole: u64 = if whole.is_empty() {
        0
    } else {
        whole
            .parse()
            .map_err(|_| invalid("exceeds the maximum token supply"))?
    };
    // At most `decimals` digits, cannot overflow
    let fraction_units: u64 = if fraction.is_empty() {
        0
    } else {
        fraction
            .parse::<u64>()
            .map_err(|_| invalid("is not a non-negative decimal number"))?
            * 10u64.pow((decimals - fraction.len()) as u32)
    };

    whole
        .checked_mul(TOKEN_DECIMALS_HELPER)
        .and_then(|raw| raw.checked_add(fraction_units))
        .ok_or_else(|| invalid("exceeds the maximum token supply"))
}

/// Convert raw base units back into a UI amount
pub fn to_ui_amount(raw: u64) -> f64 {
    raw as f64 / TOKEN_DECIMALS_HELPER as f64
}
