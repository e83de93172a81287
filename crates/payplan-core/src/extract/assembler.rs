//! Item assembly: one text block to one validated payment item.

use chrono::NaiveDate;
use chrono_tz::Tz;
use tracing::debug;

use crate::error::{ExtractError, Result};
use crate::models::schedule::{DateLocale, FieldSignals, ItemId, PaymentItem, Provider};

use super::dates::{DateNormalizer, DateRejection, find_date_candidates};
use super::provider::{detect_provider, profile_for};
use super::rules::{
    detect_autopay, detect_currency, extract_amount, extract_installment, extract_late_fee,
};

/// Sequences the per-field extractors over one block.
///
/// Each required step aborts the block with the corresponding
/// [`ExtractError`]; defaulted fields never abort. Pure apart from the
/// pinned reference date.
pub struct Assembler {
    locale: DateLocale,
    normalizer: DateNormalizer,
    default_currency: String,
}

impl Assembler {
    pub fn new(locale: DateLocale, tz: Tz, default_currency: &str) -> Self {
        Self {
            locale,
            normalizer: DateNormalizer::new(locale, tz),
            default_currency: default_currency.to_string(),
        }
    }

    /// Assembler with a pinned "today" for deterministic replays.
    pub fn anchored(locale: DateLocale, today: NaiveDate, default_currency: &str) -> Self {
        Self {
            locale,
            normalizer: DateNormalizer::anchored(locale, today),
            default_currency: default_currency.to_string(),
        }
    }

    pub fn locale(&self) -> DateLocale {
        self.locale
    }

    /// Turn one block into a payment item, or the first failure hit.
    pub fn assemble(&self, block: &str, id: ItemId) -> Result<PaymentItem> {
        let provider = detect_provider(block);
        if provider == Provider::Unknown {
            return Err(ExtractError::ProviderUnrecognized);
        }
        // Every non-Unknown provider has a table entry; see the provider
        // module tests.
        let profile = profile_for(provider)
            .ok_or_else(|| ExtractError::Internal("provider profile missing".to_string()))?;

        let amount_minor = extract_amount(block, profile)?;

        let (raw_due_date_text, due_date) = self.due_date(block, profile)?;

        let installment = extract_installment(block, profile);
        let autopay = detect_autopay(block);
        let late_fee_minor = extract_late_fee(block);
        let currency = detect_currency(block, &self.default_currency);

        let signals = FieldSignals {
            explicit_installment: installment.explicit,
            unambiguous_date: !due_date.ambiguous,
            autopay_phrase: autopay.explicit,
        };

        debug!(
            %provider,
            installment = installment.value,
            amount_minor,
            "assembled payment item from block"
        );

        Ok(PaymentItem {
            id,
            provider,
            installment_number: installment.value,
            due_date: due_date.date,
            raw_due_date_text,
            is_ambiguous_date: due_date.ambiguous,
            amount_minor,
            currency,
            autopay: autopay.value,
            late_fee_minor,
            confidence: signals.score(),
            signals,
        })
    }

    /// First viable date candidate wins; the first rejection is kept as the
    /// diagnostic reason when nothing is viable.
    fn due_date(
        &self,
        block: &str,
        profile: &super::provider::ProviderProfile,
    ) -> Result<(String, super::dates::NormalizedDate)> {
        let candidates = find_date_candidates(block, profile);
        if candidates.is_empty() {
            return Err(ExtractError::DueDateNotFound {
                reason: "no date-like text found".to_string(),
            });
        }

        let mut first_rejection: Option<DateRejection> = None;
        for candidate in candidates {
            match self.normalizer.normalize(&candidate) {
                Ok(normalized) => return Ok((candidate, normalized)),
                Err(rejection) => {
                    if first_rejection.is_none() {
                        first_rejection = Some(rejection);
                    }
                }
            }
        }

        let rejection = first_rejection.unwrap_or(DateRejection::Unparsed);
        Err(ExtractError::DueDateNotFound {
            reason: rejection.to_string(),
        })
    }
}
