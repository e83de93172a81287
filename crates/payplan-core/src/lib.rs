//! Core library for BNPL payment schedule extraction.
//!
//! This crate provides:
//! - Provider detection over pasted reminder email/receipt text
//! - Per-field extraction (amount, due date, installment, autopay, late fee)
//! - Locale-aware date normalization with ambiguity flagging
//! - Deduplication of repeated/forwarded reminders
//! - A cancellation-safe extraction controller with quick-fix/undo

pub mod error;
pub mod extract;
pub mod models;

pub use error::{ExtractError, Result};
pub use extract::{Assembler, DateNormalizer, ExtractionController};
pub use models::config::ExtractionConfig;
pub use models::schedule::{
    DateLocale, ExtractionResult, Issue, ItemId, ItemPatch, PaymentItem, Provider,
};
