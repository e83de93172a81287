//! Currency detection.

use super::patterns::USD_TOKEN;

/// Detect the currency code for a block. Never fails.
///
/// A `$` symbol or a literal "usd" token means USD; everything else falls
/// back to the configured default. Multi-currency support is an extension
/// point: a symbol table here plus per-currency minor-unit scaling in the
/// amount extractor.
pub fn detect_currency(block: &str, default_currency: &str) -> String {
    if block.contains('$') || USD_TOKEN.is_match(block) {
        return "USD".to_string();
    }
    default_currency.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dollar_symbol_means_usd() {
        assert_eq!(detect_currency("Payment: $45.00", "USD"), "USD");
    }

    #[test]
    fn test_usd_token_means_usd() {
        assert_eq!(detect_currency("amount due 45.00 USD", "USD"), "USD");
    }

    #[test]
    fn test_default_when_no_signal() {
        assert_eq!(detect_currency("payment due tomorrow", "USD"), "USD");
    }
}
