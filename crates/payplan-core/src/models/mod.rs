//! Data models: payment schedules and pipeline configuration.

pub mod config;
pub mod schedule;

pub use config::ExtractionConfig;
pub use schedule::{
    DateLocale, ExtractionResult, FieldSignals, Issue, ItemId, ItemPatch, PaymentItem, Provider,
};
