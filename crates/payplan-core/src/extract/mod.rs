//! BNPL extraction pipeline.
//!
//! Data flows strictly downward: raw text → blocks → (provider, fields) →
//! items/issues → deduplicated result, published by the controller.

pub mod assembler;
pub mod controller;
pub mod dates;
pub mod dedup;
pub mod provider;
pub mod rules;

pub use assembler::Assembler;
pub use controller::ExtractionController;
pub use dates::{DateNormalizer, DateRejection, NormalizedDate};
pub use dedup::dedup_items;
pub use provider::{ProviderProfile, detect_provider, profile_for, PROFILES};
