//! Late fee extraction.

use super::amount::to_minor_units;
use super::patterns::LATE_FEE;

/// Extract the late fee in minor units, defaulting to 0.
///
/// No fee phrase is the common, non-error case.
pub fn extract_late_fee(block: &str) -> i64 {
    if let Some(caps) = LATE_FEE.captures(block) {
        if let Some(minor) = to_minor_units(&caps[1]) {
            return minor;
        }
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_late_fee_phrase() {
        assert_eq!(extract_late_fee("Late payment fee: $7.00"), 700);
        assert_eq!(extract_late_fee("a late charge of $10 applies"), 1_000);
    }

    #[test]
    fn test_no_phrase_defaults_to_zero() {
        assert_eq!(extract_late_fee("Payment 2 of 4: $45.00"), 0);
    }

    #[test]
    fn test_negative_fee_ignored() {
        assert_eq!(extract_late_fee("late fee: -$7.00"), 0);
    }
}
