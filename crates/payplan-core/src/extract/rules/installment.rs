//! Installment number extraction.

use crate::extract::provider::ProviderProfile;

use super::Detected;

const MIN_INSTALLMENT: u8 = 1;
const MAX_INSTALLMENT: u8 = 12;

/// Extract the installment ordinal, defaulting to 1.
///
/// Absence is not an error: most first-reminder emails implicitly mean the
/// first installment. Matches outside 1..=12 are discarded in favor of the
/// default rather than failing the block.
pub fn extract_installment(block: &str, profile: &ProviderProfile) -> Detected<u8> {
    for pattern in &profile.installment_patterns {
        for caps in pattern.captures_iter(block) {
            if let Ok(n) = caps[1].parse::<u8>() {
                if (MIN_INSTALLMENT..=MAX_INSTALLMENT).contains(&n) {
                    return Detected::explicit(n);
                }
            }
        }
    }
    Detected::fallback(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::provider::{detect_provider, profile_for};

    fn klarna_profile() -> &'static ProviderProfile {
        profile_for(detect_provider("klarna")).unwrap()
    }

    #[test]
    fn test_n_of_m_phrase() {
        let detected = extract_installment("Payment 2 of 4: $45.00", klarna_profile());
        assert_eq!(detected.value, 2);
        assert!(detected.explicit);
    }

    #[test]
    fn test_generic_scan_fallback() {
        let detected = extract_installment("installment #3 is coming up", klarna_profile());
        assert_eq!(detected.value, 3);
        assert!(detected.explicit);
    }

    #[test]
    fn test_defaults_to_first_installment() {
        let detected = extract_installment("your payment is due soon", klarna_profile());
        assert_eq!(detected.value, 1);
        assert!(!detected.explicit);
    }

    #[test]
    fn test_out_of_range_discarded_for_default() {
        let detected = extract_installment("payment 13 of 24", klarna_profile());
        assert_eq!(detected.value, 1);
        assert!(!detected.explicit);

        let detected = extract_installment("payment 0 of 4", klarna_profile());
        assert_eq!(detected.value, 1);
        assert!(!detected.explicit);
    }
}
