//! Sorting of exported accumulator entries
//!
//! Sort is stable in both directions: equal keys keep first-observation order.

use std::cmp::Ordering;

use super::kind::AggregateValue;
use crate::value::Value;

/// What to order entries by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// The aggregate itself (counts, sums)
    Value,
    /// The number of collected members (lists, sets)
    Size,
}

/// Sorts `(key, value)` entries in place
pub(super) fn sort_entries(entries: &mut [(&Vec<Value>, &AggregateValue)], key: SortKey, reverse: bool) {
    entries.sort_by(|(_, a), (_, b)| {
        let ordering = compare(a, b, key);
        if reverse {
            ordering.reverse()
        } else {
            ordering
        }
    });
}

fn compare(a: &AggregateValue, b: &AggregateValue, key: SortKey) -> Ordering {
    match key {
        SortKey::Size => a.size().cmp(&b.size()),
        SortKey::Value => match (a, b) {
            (AggregateValue::Count(a), AggregateValue::Count(b)) => a.cmp(b),
            (AggregateValue::Sum(a), AggregateValue::Sum(b)) => a.cmp(b),
            (AggregateValue::List(a), AggregateValue::List(b)) => a.cmp(b),
            (AggregateValue::Set(a), AggregateValue::Set(b)) => a.iter().cmp(b.iter()),
            // One accumulator never mixes aggregate variants
            _ => Ordering::Equal,
        },
    }
}
