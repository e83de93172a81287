//! Payment amount extraction.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{ExtractError, Result};
use crate::extract::provider::ProviderProfile;

/// Extract the payment amount in integer minor units.
///
/// The profile's patterns are tried in order; the first capture of each
/// pattern is parsed and negative values are rejected, moving on to the
/// next pattern. When nothing yields a valid non-negative amount the block
/// fails with [`ExtractError::AmountNotFound`].
pub fn extract_amount(block: &str, profile: &ProviderProfile) -> Result<i64> {
    for pattern in &profile.amount_patterns {
        if let Some(caps) = pattern.captures(block) {
            if let Some(minor) = to_minor_units(&caps[1]) {
                return Ok(minor);
            }
        }
    }
    Err(ExtractError::AmountNotFound)
}

/// Parse captured amount text ("$1,234.56", "-$5.00") into minor units.
///
/// Returns `None` for negative or unparsable values. Scaling is fixed at
/// two decimal places; supporting 0- or 3-decimal currencies would thread
/// the detected currency through here.
pub(crate) fn to_minor_units(captured: &str) -> Option<i64> {
    let cleaned: String = captured
        .chars()
        .filter(|c| !matches!(c, '$' | ','))
        .collect();
    let amount = Decimal::from_str(cleaned.trim()).ok()?;
    if amount.is_sign_negative() {
        return None;
    }
    (amount * Decimal::ONE_HUNDRED).round().to_i64()
}
