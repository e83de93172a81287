//! Extraction controller: splitting, single-flight orchestration, and
//! quick-fix/undo on produced items.
//!
//! This is the only component with mutable state: the latest-sequence
//! counter and the per-id undo snapshot table. Everything below it is pure,
//! so all concurrency reasoning lives here.

use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::NaiveDate;
use chrono_tz::Tz;
use tracing::{debug, info, warn};

use crate::error::ExtractError;
use crate::models::config::ExtractionConfig;
use crate::models::schedule::{
    DateLocale, ExtractionResult, Issue, ItemId, ItemPatch, PaymentItem,
};

use super::assembler::Assembler;
use super::dedup::dedup_items;
use super::rules::patterns::{ABS_PATH, BOUNDARY_HEADER, BOUNDARY_RULE, TRAILING_AT};

/// State scoped to the most recent honored extraction call.
#[derive(Default)]
struct Session {
    items: Vec<PaymentItem>,
    undo: HashMap<ItemId, PaymentItem>,
}

/// Drives repeated user-triggered extractions.
///
/// Calls are single-flight, last-request-wins: each call takes a sequence
/// number, yields once so further calls can be issued, and on resume
/// discards itself if a newer call exists. Results of superseded calls are
/// never published.
pub struct ExtractionController {
    config: ExtractionConfig,
    /// Pinned "today" for plausibility checks; `None` means the current
    /// date in the caller's time zone.
    reference_date: Option<NaiveDate>,
    latest_seq: AtomicU64,
    session: Mutex<Session>,
}

impl ExtractionController {
    pub fn new(config: ExtractionConfig) -> Self {
        Self {
            config,
            reference_date: None,
            latest_seq: AtomicU64::new(0),
            session: Mutex::new(Session::default()),
        }
    }

    /// Pin the reference date used for date plausibility checks.
    pub fn with_reference_date(mut self, today: NaiveDate) -> Self {
        self.reference_date = Some(today);
        self
    }

    /// Run one extraction over pasted text.
    ///
    /// Returns `None` when a newer call superseded this one; the caller
    /// should simply drop it. The call itself never fails: every per-block
    /// problem becomes an [`Issue`] in the returned result.
    pub async fn extract(
        &self,
        text: &str,
        locale_hint: Option<DateLocale>,
        tz: Tz,
    ) -> Option<ExtractionResult> {
        let seq = self.latest_seq.fetch_add(1, Ordering::SeqCst) + 1;

        // The single suspension point: hand control back once before any
        // block work so further keystrokes can issue a newer call.
        tokio::task::yield_now().await;
        if self.latest_seq.load(Ordering::SeqCst) != seq {
            debug!(seq, "extraction superseded before block processing");
            return None;
        }

        let locale = locale_hint.unwrap_or(self.config.date_locale);
        let assembler = match self.reference_date {
            Some(today) => Assembler::anchored(locale, today, &self.config.default_currency),
            None => Assembler::new(locale, tz, &self.config.default_currency),
        };

        let capped = cap_input(text, self.config.max_input_chars);
        let blocks = split_blocks(&capped, self.config.min_block_chars);

        let mut items = Vec::new();
        let mut issues = Vec::new();
        for (index, block) in blocks.iter().enumerate() {
            let id = ItemId::new(seq, index as u32);
            let assemble = || assembler.assemble(block, id);
            match process_block(assemble, block, self.config.snippet_chars) {
                Ok(item) => items.push(item),
                Err(issue) => issues.push(issue),
            }
        }

        let (mut items, duplicates_removed) = dedup_items(items);
        items.truncate(self.config.max_items);

        info!(
            seq,
            items = items.len(),
            issues = issues.len(),
            duplicates_removed,
            "extraction finished"
        );

        let result = ExtractionResult {
            items,
            issues,
            duplicates_removed,
            date_locale: locale,
        };

        let mut session = self.lock_session();
        // Re-check under the lock: even if an older call somehow finishes
        // late, only the last issued call publishes.
        if self.latest_seq.load(Ordering::SeqCst) != seq {
            debug!(seq, "extraction superseded after block processing");
            return None;
        }
        session.items = result.items.clone();
        session.undo.clear();

        Some(result)
    }

    /// Patch an item of the current result by id.
    ///
    /// Stores a one-deep undo snapshot for the id, overwriting any prior
    /// snapshot, recomputes confidence, and returns the updated item.
    /// Returns `None` for an unknown id.
    pub fn apply_fix(&self, id: ItemId, patch: &ItemPatch) -> Option<PaymentItem> {
        let mut session = self.lock_session();
        let Session { items, undo } = &mut *session;
        let item = items.iter_mut().find(|item| item.id == id)?;
        let snapshot = item.clone();

        if let Some(due_date) = patch.due_date {
            item.due_date = due_date;
            // A manual correction is unambiguous by definition.
            item.is_ambiguous_date = false;
            item.signals.unambiguous_date = true;
        }
        if let Some(amount) = patch.amount_minor {
            if amount >= 0 {
                item.amount_minor = amount;
            }
        }
        if let Some(number) = patch.installment_number {
            if (1..=12).contains(&number) {
                item.installment_number = number;
                item.signals.explicit_installment = true;
            }
        }
        if let Some(autopay) = patch.autopay {
            item.autopay = autopay;
            item.signals.autopay_phrase = true;
        }
        if let Some(fee) = patch.late_fee_minor {
            if fee >= 0 {
                item.late_fee_minor = fee;
            }
        }

        item.recompute_confidence();
        undo.insert(id, snapshot);
        Some(item.clone())
    }

    /// Restore the pre-patch snapshot for an id and clear it.
    ///
    /// A second undo for the same id is a no-op returning `None`.
    pub fn undo_fix(&self, id: ItemId) -> Option<PaymentItem> {
        let mut session = self.lock_session();
        let Session { items, undo } = &mut *session;
        let snapshot = undo.remove(&id)?;
        let item = items.iter_mut().find(|item| item.id == id)?;
        *item = snapshot;
        Some(item.clone())
    }

    fn lock_session(&self) -> std::sync::MutexGuard<'_, Session> {
        // The lock is never held across an await and block processing is
        // panic-contained, so poisoning cannot leave torn state behind.
        self.session
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// Run one block's assembly with panics contained at the block boundary.
///
/// An extraction error or a panic both collapse into one [`Issue`] for the
/// block; neighboring blocks are unaffected either way.
fn process_block(
    assemble: impl FnOnce() -> crate::error::Result<PaymentItem>,
    block: &str,
    snippet_chars: usize,
) -> std::result::Result<PaymentItem, Issue> {
    match panic::catch_unwind(AssertUnwindSafe(assemble)) {
        Ok(Ok(item)) => Ok(item),
        Ok(Err(err)) => {
            let reason = match err {
                ExtractError::Internal(message) => sanitize_internal(&message),
                other => other.to_string(),
            };
            Err(Issue {
                snippet: snippet(block, snippet_chars),
                reason,
            })
        }
        Err(payload) => {
            warn!("block processing panicked");
            Err(Issue {
                snippet: snippet(block, snippet_chars),
                reason: sanitize_internal(&panic_message(payload)),
            })
        }
    }
}

/// Split raw input into candidate blocks.
///
/// Boundary lines are runs of three-or-more dashes/underscores (discarded)
/// and `From:`/`Subject:` header lines (kept as the start of the next
/// block). Fragments below the minimum length are dropped as noise. Input
/// without any boundary is one block regardless of length.
fn split_blocks(text: &str, min_block_chars: usize) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current = String::new();
    let mut saw_boundary = false;

    let flush = |current: &mut String, blocks: &mut Vec<String>| {
        let trimmed = current.trim();
        if trimmed.chars().count() >= min_block_chars {
            blocks.push(trimmed.to_string());
        }
        current.clear();
    };

    for line in text.lines() {
        if BOUNDARY_RULE.is_match(line) {
            saw_boundary = true;
            flush(&mut current, &mut blocks);
        } else if BOUNDARY_HEADER.is_match(line) {
            saw_boundary = true;
            flush(&mut current, &mut blocks);
            current.push_str(line);
            current.push('\n');
        } else {
            current.push_str(line);
            current.push('\n');
        }
    }
    flush(&mut current, &mut blocks);

    if !saw_boundary {
        let whole = text.trim();
        if whole.is_empty() {
            return Vec::new();
        }
        return vec![whole.to_string()];
    }

    blocks
}

fn cap_input(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

fn snippet(block: &str, max_chars: usize) -> String {
    if block.chars().count() <= max_chars {
        return block.to_string();
    }
    let mut truncated: String = block.chars().take(max_chars).collect();
    truncated.push('…');
    truncated
}

/// Sanitize an internal error message before surfacing it in an issue:
/// first line only, no absolute paths, no trailing "at <location>"
/// fragments; a generic message when nothing actionable survives.
fn sanitize_internal(message: &str) -> String {
    let first_line = message.lines().next().unwrap_or("");
    let without_location = TRAILING_AT.replace(first_line, "");
    let cleaned = ABS_PATH.replace_all(&without_location, "").trim().to_string();

    if cleaned.is_empty() {
        "An error occurred during extraction".to_string()
    } else {
        cleaned
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_on_dash_runs() {
        let text = "Klarna payment 1 of 4: $10.00\n-----\nAfterpay installment 2 of 4: $20.00";
        let blocks = split_blocks(text, 12);

        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].starts_with("Klarna"));
        assert!(blocks[1].starts_with("Afterpay"));
    }

    #[test]
    fn test_header_lines_start_new_block_and_are_kept() {
        let text = "Some preamble text here\nFrom: Klarna <no-reply@klarna.com>\nPayment 1 of 4: $10.00";
        let blocks = split_blocks(text, 12);

        assert_eq!(blocks.len(), 2);
        assert!(blocks[1].starts_with("From: Klarna"));
    }

    #[test]
    fn test_short_fragments_dropped_as_noise() {
        let text = "Klarna payment 1 of 4 due soon: $10.00\n___\nok\n___\nAfterpay installment reminder: $20.00";
        let blocks = split_blocks(text, 12);

        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn test_no_boundary_is_one_block_even_if_short() {
        let blocks = split_blocks("tiny", 12);
        assert_eq!(blocks, vec!["tiny".to_string()]);
    }

    #[test]
    fn test_empty_input_has_no_blocks() {
        assert!(split_blocks("", 12).is_empty());
        assert!(split_blocks("  \n \n", 12).is_empty());
    }

    #[test]
    fn test_panicking_block_becomes_one_sanitized_issue() {
        let issue = process_block(
            || panic!("index out of bounds at /home/user/project/src/x.rs:3:14"),
            "Klarna block that trips an internal bug",
            80,
        )
        .unwrap_err();

        assert_eq!(issue.reason, "index out of bounds");
        assert_eq!(issue.snippet, "Klarna block that trips an internal bug");
    }

    #[test]
    fn test_panic_in_one_block_leaves_siblings_intact() {
        let today = NaiveDate::from_ymd_opt(2025, 9, 20).unwrap();
        let assembler = Assembler::anchored(DateLocale::Us, today, "USD");
        let good_block = "Klarna: payment 1 of 4: $10.00 due on: 2025-10-06";

        let bad = process_block(|| panic!("boom"), "broken sibling block", 80);
        let good = process_block(
            || assembler.assemble(good_block, ItemId::new(1, 1)),
            good_block,
            80,
        );

        assert!(bad.is_err());
        let item = good.unwrap();
        assert_eq!(item.amount_minor, 1_000);
        assert_eq!(
            item.due_date,
            NaiveDate::from_ymd_opt(2025, 10, 6).unwrap()
        );
    }

    #[test]
    fn test_panic_with_opaque_payload_gets_generic_reason() {
        let issue = process_block(
            || std::panic::panic_any(42_u32),
            "opaque payload block",
            80,
        )
        .unwrap_err();

        assert_eq!(issue.reason, "An error occurred during extraction");
    }

    #[test]
    fn test_input_cap_counts_chars() {
        let text = "é".repeat(20);
        let capped = cap_input(&text, 16);
        assert_eq!(capped.chars().count(), 16);

        assert_eq!(cap_input("short", 16), "short");
    }

    #[test]
    fn test_sanitize_keeps_actionable_first_line() {
        assert_eq!(
            sanitize_internal("Invalid date: month out of range\nstack line two"),
            "Invalid date: month out of range"
        );
    }

    #[test]
    fn test_sanitize_strips_paths_and_locations() {
        assert_eq!(
            sanitize_internal("parse failure in /home/user/project/src/dates.rs:42:7"),
            "parse failure in"
        );
        assert_eq!(
            sanitize_internal("index out of bounds at src/extract/controller.rs:10"),
            "index out of bounds"
        );
    }

    #[test]
    fn test_sanitize_falls_back_when_empty() {
        assert_eq!(
            sanitize_internal("/usr/local/whatever/path"),
            "An error occurred during extraction"
        );
        assert_eq!(sanitize_internal(""), "An error occurred during extraction");
    }

    #[test]
    fn test_snippet_truncation() {
        let long = "x".repeat(100);
        let s = snippet(&long, 80);
        assert_eq!(s.chars().count(), 81);
        assert!(s.ends_with('…'));

        assert_eq!(snippet("short", 80), "short");
    }
}
