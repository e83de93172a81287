//! Provider detection and per-provider pattern tables.
//!
//! Each known provider carries a signature-phrase list for detection plus
//! ordered pattern lists the field extractors try first. Providers are
//! tested in the fixed order of [`PROFILES`]; the first signature match
//! wins. Adding a provider is a data change: one enum variant and one
//! profile entry.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::schedule::Provider;

use super::rules::patterns::{GENERIC_AMOUNT_SRC, GENERIC_DUE_CONTEXT_SRC, GENERIC_INSTALLMENT_SRC};

/// Signature phrases and field patterns for one provider.
pub struct ProviderProfile {
    pub provider: Provider,
    /// Lower-case phrases tested by substring containment.
    pub signatures: &'static [&'static str],
    /// Amount patterns, most specific first; group 1 captures the signed
    /// dollar amount text.
    pub amount_patterns: Vec<Regex>,
    /// Due-date context patterns; group 1 captures the rest of the line the
    /// date is expected on.
    pub due_date_patterns: Vec<Regex>,
    /// Installment patterns; group 1 captures the installment ordinal.
    pub installment_patterns: Vec<Regex>,
}

fn compile(sources: &[&str]) -> Vec<Regex> {
    sources
        .iter()
        .map(|s| Regex::new(s).expect("static pattern table must compile"))
        .collect()
}

/// Builds a profile with the shared generic patterns appended after the
/// provider-specific ones, preserving the "provider patterns first" order.
fn profile(
    provider: Provider,
    signatures: &'static [&'static str],
    amount: &[&str],
    due_date: &[&str],
    installment: &[&str],
) -> ProviderProfile {
    let mut amount_patterns = compile(amount);
    amount_patterns.extend(compile(&[GENERIC_AMOUNT_SRC]));

    let mut due_date_patterns = compile(due_date);
    due_date_patterns.extend(compile(&[GENERIC_DUE_CONTEXT_SRC]));

    let mut installment_patterns = compile(installment);
    installment_patterns.extend(compile(&[GENERIC_INSTALLMENT_SRC]));

    ProviderProfile {
        provider,
        signatures,
        amount_patterns,
        due_date_patterns,
        installment_patterns,
    }
}

lazy_static! {
    /// Provider profiles in detection priority order.
    pub static ref PROFILES: Vec<ProviderProfile> = vec![
        profile(
            Provider::Klarna,
            &["klarna"],
            &[
                r"(?i)payment\s+\d{1,2}\s+of\s+\d{1,2}[:\s]*(-?\$\s*-?\d[\d,]*(?:\.\d{1,2})?)",
                r"(?i)(?:amount|payment)\s+due[:\s]*(-?\$\s*-?\d[\d,]*(?:\.\d{1,2})?)",
            ],
            &[r"(?i)due\s+(?:date|on|by)[:\s]+([^\n]+)"],
            &[r"(?i)payment\s+(\d{1,2})\s+of\s+\d{1,2}"],
        ),
        profile(
            Provider::Afterpay,
            &["afterpay", "after pay"],
            &[
                r"(?i)instal?lment\s+\d{1,2}\s+of\s+\d{1,2}[:\s]*(-?\$\s*-?\d[\d,]*(?:\.\d{1,2})?)",
                r"(?i)next\s+payment[:\s]*(-?\$\s*-?\d[\d,]*(?:\.\d{1,2})?)",
            ],
            &[r"(?i)(?:due|scheduled)\s+(?:date|on|for)[:\s]+([^\n]+)"],
            &[r"(?i)instal?lment\s+(\d{1,2})\s+of\s+\d{1,2}"],
        ),
        profile(
            Provider::Affirm,
            &["affirm"],
            &[r"(?i)(?:monthly\s+)?payment\s+(?:of|amount)[:\s]*(-?\$\s*-?\d[\d,]*(?:\.\d{1,2})?)"],
            &[r"(?i)(?:due|payment)\s+(?:date|on|by)[:\s]+([^\n]+)"],
            &[r"(?i)payment\s+(\d{1,2})\s+of\s+\d{1,2}"],
        ),
        profile(
            Provider::Sezzle,
            &["sezzle"],
            &[r"(?i)instal?lment[:\s]*(-?\$\s*-?\d[\d,]*(?:\.\d{1,2})?)"],
            &[r"(?i)(?:due|reschedule[d]?\s+to)[:\s]+([^\n]+)"],
            &[r"(?i)(\d{1,2})(?:st|nd|rd|th)?\s+of\s+\d{1,2}\s+instal?lments"],
        ),
        profile(
            Provider::Zip,
            // Bare "zip" is too loose (zip codes); match the brand phrases.
            &["zip pay", "zip money", "quadpay", "zip co"],
            &[r"(?i)instal?lment\s+amount[:\s]*(-?\$\s*-?\d[\d,]*(?:\.\d{1,2})?)"],
            &[r"(?i)(?:due|payment)\s+(?:date|on)[:\s]+([^\n]+)"],
            &[r"(?i)instal?lment\s+(\d{1,2})\s*(?:of|/)\s*\d{1,2}"],
        ),
        profile(
            Provider::PaypalPayIn4,
            &["pay in 4", "paypal"],
            &[r"(?i)payment\s+\d{1,2}\s+of\s+4[:\s]*(-?\$\s*-?\d[\d,]*(?:\.\d{1,2})?)"],
            &[r"(?i)(?:due|payment)\s+(?:date|on|by)[:\s]+([^\n]+)"],
            &[r"(?i)payment\s+(\d{1,2})\s+of\s+4"],
        ),
    ];
}

/// Classify a block of text as one of the known providers.
///
/// Pure: signature lists are tested in priority order by substring
/// containment against the lower-cased block; first match wins.
pub fn detect_provider(block: &str) -> Provider {
    let lowered = block.to_lowercase();
    for profile in PROFILES.iter() {
        if profile.signatures.iter().any(|sig| lowered.contains(sig)) {
            return profile.provider;
        }
    }
    Provider::Unknown
}

/// Look up the pattern table for a detected provider.
pub fn profile_for(provider: Provider) -> Option<&'static ProviderProfile> {
    PROFILES.iter().find(|p| p.provider == provider)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_known_providers() {
        assert_eq!(
            detect_provider("Your Klarna payment is coming up"),
            Provider::Klarna
        );
        assert_eq!(
            detect_provider("AFTERPAY installment reminder"),
            Provider::Afterpay
        );
        assert_eq!(
            detect_provider("Pay in 4 with PayPal"),
            Provider::PaypalPayIn4
        );
    }

    #[test]
    fn test_unknown_for_unrecognized_text() {
        assert_eq!(
            detect_provider("Your electricity bill is due"),
            Provider::Unknown
        );
    }

    #[test]
    fn test_priority_order_first_match_wins() {
        // Both signatures present; Klarna is earlier in the table.
        assert_eq!(
            detect_provider("Forwarded from Klarna via Afterpay"),
            Provider::Klarna
        );
    }

    #[test]
    fn test_zip_signature_does_not_match_zip_codes() {
        assert_eq!(
            detect_provider("Ship to: 100 Main St, zip 94110"),
            Provider::Unknown
        );
    }

    #[test]
    fn test_every_known_provider_has_a_profile() {
        for profile in PROFILES.iter() {
            assert!(profile_for(profile.provider).is_some());
            assert!(!profile.signatures.is_empty());
            assert!(!profile.amount_patterns.is_empty());
        }
        assert!(profile_for(Provider::Unknown).is_none());
    }
}
