//! Autopay detection.

use super::Detected;

/// Negative phrasing wins over any positive phrasing in the same block.
const NEGATIVE_PHRASES: &[&str] = &[
    "autopay is off",
    "autopay off",
    "autopay is disabled",
    "autopay disabled",
    "autopay has been turned off",
    "autopay: off",
    "automatic payments are off",
    "automatic payments disabled",
    "auto-pay is off",
];

const POSITIVE_PHRASES: &[&str] = &[
    "autopay is on",
    "autopay on",
    "autopay is enabled",
    "autopay enabled",
    "autopay: on",
    "automatic payments are on",
    "automatic payments enabled",
    "auto-pay is on",
    "will be charged automatically",
    "charged automatically",
];

/// Detect whether autopay is enabled, defaulting to `false`.
///
/// The negative list is checked first and short-circuits regardless of any
/// positive phrasing elsewhere in the block.
pub fn detect_autopay(block: &str) -> Detected<bool> {
    let lowered = block.to_lowercase();

    if NEGATIVE_PHRASES.iter().any(|p| lowered.contains(p)) {
        return Detected::explicit(false);
    }
    if POSITIVE_PHRASES.iter().any(|p| lowered.contains(p)) {
        return Detected::explicit(true);
    }
    Detected::fallback(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_phrase() {
        let detected = detect_autopay("Good news: AutoPay is ON for this plan.");
        assert!(detected.value);
        assert!(detected.explicit);
    }

    #[test]
    fn test_negative_phrase() {
        let detected = detect_autopay("AutoPay is disabled. Pay manually.");
        assert!(!detected.value);
        assert!(detected.explicit);
    }

    #[test]
    fn test_negative_short_circuits_positive() {
        let detected =
            detect_autopay("AutoPay is on for other plans, but autopay is off for this one.");
        assert!(!detected.value);
        assert!(detected.explicit);
    }

    #[test]
    fn test_default_false() {
        let detected = detect_autopay("Payment 2 of 4 due soon.");
        assert!(!detected.value);
        assert!(!detected.explicit);
    }
}
