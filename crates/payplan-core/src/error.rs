//! Error types for the payplan-core library.

use thiserror::Error;

/// Per-block extraction failure.
///
/// Every variant is recovered at the block boundary by the extraction
/// controller and turned into an [`crate::models::schedule::Issue`]; none of
/// them escape the top-level extraction call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// No known BNPL provider signature matched the block.
    #[error("Provider not recognized")]
    ProviderUnrecognized,

    /// No pattern yielded a valid non-negative payment amount.
    #[error("Amount not found")]
    AmountNotFound,

    /// No due date could be established for the block. Covers both
    /// unparsable date text and dates rejected as implausible; the inner
    /// reason preserves the distinction for diagnostics.
    #[error("Due date not found: {reason}")]
    DueDateNotFound { reason: String },

    /// Unexpected failure while processing a block. The message is
    /// sanitized before it is surfaced to users.
    #[error("{0}")]
    Internal(String),
}

/// Result type for the payplan-core library.
pub type Result<T> = std::result::Result<T, ExtractError>;
