//! Deduplication of logically identical payment items.

use std::collections::HashSet;

use crate::models::schedule::PaymentItem;

/// Collapse items sharing (provider, installment number, due date).
///
/// The first item in block order survives. The key deliberately excludes
/// amount/autopay/fee: the same reminder pasted twice (forwarded plus
/// original) often differs trivially in that surface text while describing
/// one obligation.
pub fn dedup_items(items: Vec<PaymentItem>) -> (Vec<PaymentItem>, usize) {
    let mut seen = HashSet::new();
    let mut kept = Vec::with_capacity(items.len());
    let mut removed = 0;

    for item in items {
        if seen.insert(item.dedup_key()) {
            kept.push(item);
        } else {
            removed += 1;
        }
    }

    (kept, removed)
}
