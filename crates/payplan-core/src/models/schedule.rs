//! Data models for extracted BNPL payment schedules.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Known BNPL providers, in detection priority order.
///
/// Adding a provider means adding a variant here and one entry to the
/// pattern table in [`crate::extract::provider`]; no orchestration code
/// changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    Klarna,
    Afterpay,
    Affirm,
    Sezzle,
    Zip,
    PaypalPayIn4,
    /// No signature phrase matched.
    Unknown,
}

impl Provider {
    /// Human-readable display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::Klarna => "Klarna",
            Provider::Afterpay => "Afterpay",
            Provider::Affirm => "Affirm",
            Provider::Sezzle => "Sezzle",
            Provider::Zip => "Zip",
            Provider::PaypalPayIn4 => "PayPal Pay in 4",
            Provider::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Ordering convention for slash-separated numeric dates.
///
/// Used only to resolve ambiguous forms like `01/02/2026`; every other date
/// format parses identically under both locales.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateLocale {
    /// month/day ordering.
    #[default]
    Us,
    /// day/month ordering.
    Eu,
}

/// Identifier for a payment item, stable within one extraction call.
///
/// Composed from the call's sequence number and the item's block index, so
/// ids never collide across calls but are not meaningful between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u64);

impl ItemId {
    pub fn new(call_seq: u64, block_index: u32) -> Self {
        Self((call_seq << 32) | u64::from(block_index))
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which optional signals were actually present in the source block.
///
/// Kept alongside the item (not serialized) so confidence can be recomputed
/// after a quick-fix patch without re-running extraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldSignals {
    /// An explicit "N of M"-style installment phrase matched.
    pub explicit_installment: bool,
    /// The due date text was not an ambiguous two-numeric slash form.
    pub unambiguous_date: bool,
    /// An autopay phrase (positive or negative) matched.
    pub autopay_phrase: bool,
}

impl FieldSignals {
    /// Advisory confidence score derived from the present signals.
    pub fn score(&self) -> f32 {
        let mut confidence = 0.4;
        if self.unambiguous_date {
            confidence += 0.25;
        }
        if self.explicit_installment {
            confidence += 0.2;
        }
        if self.autopay_phrase {
            confidence += 0.15;
        }
        confidence
    }
}

/// One extracted payment obligation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentItem {
    /// Per-call-stable identifier.
    pub id: ItemId,

    /// Detected provider.
    pub provider: Provider,

    /// Installment position within the plan, 1-12.
    pub installment_number: u8,

    /// Canonical due date, serialized as YYYY-MM-DD.
    pub due_date: NaiveDate,

    /// The raw date text the due date was parsed from.
    pub raw_due_date_text: String,

    /// True when the raw date was a two-numeric slash form readable under
    /// either locale. Advisory; does not block acceptance.
    pub is_ambiguous_date: bool,

    /// Payment amount in integer minor units (cents).
    pub amount_minor: i64,

    /// Three-letter currency code.
    pub currency: String,

    /// Whether automatic payment is enabled.
    pub autopay: bool,

    /// Late fee in integer minor units, 0 when no fee phrase was found.
    pub late_fee_minor: i64,

    /// Advisory confidence score, never a rejection criterion.
    pub confidence: f32,

    /// Signals the confidence was derived from.
    #[serde(skip)]
    pub(crate) signals: FieldSignals,
}

impl PaymentItem {
    /// Identity key used by the deduplicator.
    pub fn dedup_key(&self) -> (Provider, u8, NaiveDate) {
        (self.provider, self.installment_number, self.due_date)
    }

    pub(crate) fn recompute_confidence(&mut self) {
        self.confidence = self.signals.score();
    }
}

/// A block that could not be turned into a payment item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Truncated source text for orientation.
    pub snippet: String,
    /// Human-readable failure reason.
    pub reason: String,
}

/// Aggregate output of one extraction call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Accepted items, in block-discovery order.
    pub items: Vec<PaymentItem>,

    /// One entry per block that failed extraction, in block order.
    pub issues: Vec<Issue>,

    /// How many logically identical items were elided.
    pub duplicates_removed: usize,

    /// The locale the call resolved slash dates under.
    pub date_locale: DateLocale,
}

/// Partial correction applied to an existing item by id.
///
/// Fields left as `None` are untouched. Values that would violate the model
/// invariants (negative money, installment outside 1-12) are ignored rather
/// than applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemPatch {
    pub due_date: Option<NaiveDate>,
    pub amount_minor: Option<i64>,
    pub installment_number: Option<u8>,
    pub autopay: Option<bool>,
    pub late_fee_minor: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_scoring() {
        let none = FieldSignals::default();
        let all = FieldSignals {
            explicit_installment: true,
            unambiguous_date: true,
            autopay_phrase: true,
        };

        assert!(none.score() < all.score());
        assert!((all.score() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_item_ids_distinct_across_calls() {
        assert_ne!(ItemId::new(1, 0), ItemId::new(2, 0));
        assert_ne!(ItemId::new(1, 0), ItemId::new(1, 1));
        assert_eq!(ItemId::new(3, 7), ItemId::new(3, 7));
    }

    #[test]
    fn test_date_locale_serde() {
        assert_eq!(serde_json::to_string(&DateLocale::Us).unwrap(), "\"us\"");
        assert_eq!(
            serde_json::from_str::<DateLocale>("\"eu\"").unwrap(),
            DateLocale::Eu
        );
    }
}
