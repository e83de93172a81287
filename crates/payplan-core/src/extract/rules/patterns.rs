//! Shared regex patterns for BNPL reminder extraction.
//!
//! Provider-specific patterns live in the profile table in
//! [`crate::extract::provider`]; everything here is generic fallback or
//! infrastructure (block boundaries, date tokens, sanitization).

use lazy_static::lazy_static;
use regex::Regex;

/// Generic dollar amount; group 1 captures the signed amount text.
pub const GENERIC_AMOUNT_SRC: &str = r"(-?\$\s*-?\d[\d,]*(?:\.\d{1,2})?)";

/// Generic due/payment context line; group 1 captures the rest of the line.
pub const GENERIC_DUE_CONTEXT_SRC: &str =
    r"(?i)(?:due|payable|payment)\s*(?:date|on|by)?[:\s]+([^\n]+)";

/// Generic installment ordinal scan; group 1 captures the ordinal.
pub const GENERIC_INSTALLMENT_SRC: &str =
    r"(?i)(?:instal?lment|payment)\s*(?:number|no\.?|#)?\s*(\d{1,2})\b";

const MONTHS: &str = "january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sep|oct|nov|dec";

lazy_static! {
    // Date-like tokens, scanned in this order within a block.
    pub static ref DATE_ISO: Regex = Regex::new(r"\b\d{4}-\d{2}-\d{2}\b").unwrap();

    pub static ref DATE_SLASH: Regex = Regex::new(r"\b\d{1,2}/\d{1,2}/\d{2,4}\b").unwrap();

    pub static ref DATE_TEXT_MDY: Regex = Regex::new(&format!(
        r"(?i)\b(?:{MONTHS})\.?\s+\d{{1,2}}(?:st|nd|rd|th)?,?\s+\d{{4}}"
    ))
    .unwrap();

    pub static ref DATE_TEXT_DMY: Regex = Regex::new(&format!(
        r"(?i)\b\d{{1,2}}(?:st|nd|rd|th)?\s+(?:{MONTHS})\.?,?\s+\d{{4}}"
    ))
    .unwrap();

    /// Ordinal day suffixes (1st/2nd/3rd/4th...), stripped before parsing.
    pub static ref ORDINAL_SUFFIX: Regex = Regex::new(r"(?i)\b(\d{1,2})(?:st|nd|rd|th)\b").unwrap();

    /// Anchored two-numeric slash form; the locale decides which part is
    /// the month, and the form is ambiguous when both parts are in 1..=12.
    pub static ref SLASH_DATE: Regex =
        Regex::new(r"^\s*(\d{1,2})/(\d{1,2})/(\d{2,4})\s*$").unwrap();

    // Block boundaries.
    pub static ref BOUNDARY_RULE: Regex = Regex::new(r"^\s*[-_]{3,}\s*$").unwrap();
    pub static ref BOUNDARY_HEADER: Regex = Regex::new(r"^(?:From|Subject):").unwrap();

    /// Late fee phrases; group 1 captures the signed amount text.
    pub static ref LATE_FEE: Regex = Regex::new(
        r"(?i)late\s+(?:payment\s+)?(?:fee|charge)s?[:\s]*(?:of\s+)?(-?\$\s*-?\d[\d,]*(?:\.\d{1,2})?)"
    )
    .unwrap();

    /// Literal USD token for currency detection.
    pub static ref USD_TOKEN: Regex = Regex::new(r"(?i)\busd\b").unwrap();

    // Sanitization of internal error messages before they reach issues.
    pub static ref ABS_PATH: Regex =
        Regex::new(r"(?:[A-Za-z]:)?(?:[\\/][\w.\-]+){2,}(?::\d+(?::\d+)?)?").unwrap();
    pub static ref TRAILING_AT: Regex = Regex::new(r"(?:\s+at\s+\S+)+\s*$").unwrap();
}
