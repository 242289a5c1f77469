//! Keyed accumulator
//!
//! One accumulator serves every group key seen during an aggregation. Entries
//! live in an `IndexMap`, so export and tie order follow first observation.

use indexmap::IndexMap;

use super::errors::AccumulatorResult;
use super::kind::{AccumulatorKind, AggregateValue};
use super::sort::{sort_entries, SortKey};
use crate::filter::Operator;
use crate::value::{GroupKey, Value};

/// Mapping from group key to aggregate value
#[derive(Debug, Clone, PartialEq)]
pub struct Accumulator {
    kind: AccumulatorKind,
    entries: IndexMap<GroupKey, AggregateValue>,
}

impl Accumulator {
    /// Creates an empty accumulator of the given kind
    pub fn new(kind: AccumulatorKind) -> Self {
        Self {
            kind,
            entries: IndexMap::new(),
        }
    }

    pub fn count() -> Self {
        Self::new(AccumulatorKind::Count)
    }

    pub fn sum() -> Self {
        Self::new(AccumulatorKind::Sum)
    }

    pub fn list() -> Self {
        Self::new(AccumulatorKind::List)
    }

    pub fn set() -> Self {
        Self::new(AccumulatorKind::Set)
    }

    /// Counts values satisfying `op(value, threshold)`, registering all keys
    pub fn filtered_count(op: Operator, threshold: impl Into<Value>) -> Self {
        Self::new(AccumulatorKind::FilteredCount {
            op,
            threshold: threshold.into(),
        })
    }

    /// Lists values satisfying `op(value, threshold)`, registering all keys
    pub fn filtered_list(op: Operator, threshold: impl Into<Value>) -> Self {
        Self::new(AccumulatorKind::FilteredList {
            op,
            threshold: threshold.into(),
        })
    }

    /// Collects distinct values satisfying `op(value, threshold)`, registering all keys
    pub fn filtered_set(op: Operator, threshold: impl Into<Value>) -> Self {
        Self::new(AccumulatorKind::FilteredSet {
            op,
            threshold: threshold.into(),
        })
    }

    pub fn kind(&self) -> &AccumulatorKind {
        &self.kind
    }

    /// Folds `value` into the entry for `key`.
    ///
    /// For filtered kinds a value failing the gate only registers an unseen
    /// key at its empty value.
    pub fn observe(&mut self, key: &[Value], value: &Value) -> AccumulatorResult<()> {
        if let Some((op, threshold)) = self.kind.gate() {
            if !op.evaluate(value, threshold) {
                if !self.entries.contains_key(key) {
                    self.entries.insert(key.to_vec(), self.kind.empty_value());
                }
                return Ok(());
            }
        }

        match self.entries.get_mut(key) {
            Some(existing) => existing.fold(value, key),
            None => {
                let fresh = self.kind.first_value(value)?;
                self.entries.insert(key.to_vec(), fresh);
                Ok(())
            }
        }
    }

    pub fn get(&self, key: &[Value]) -> Option<&AggregateValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &[Value]) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in first-observation order
    pub fn keys(&self) -> impl Iterator<Item = &GroupKey> {
        self.entries.keys()
    }

    /// Entries in first-observation order
    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, &AggregateValue)> {
        self.entries.iter()
    }

    /// Owned copy of all entries in first-observation order
    pub fn export(&self) -> Vec<(GroupKey, AggregateValue)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Entries ordered by the kind's natural sort key
    pub fn sorted(&self, reverse: bool) -> Vec<(&GroupKey, &AggregateValue)> {
        self.sorted_by(self.kind.default_sort_key(), reverse)
    }

    /// Entries ordered by `key`, descending when `reverse`
    pub fn sorted_by(&self, key: SortKey, reverse: bool) -> Vec<(&GroupKey, &AggregateValue)> {
        let mut entries: Vec<_> = self.entries.iter().collect();
        sort_entries(&mut entries, key, reverse);
        entries
    }

    /// JSON array of `{"key": [...], "value": ...}` objects
    pub fn to_json(&self) -> serde_json::Value {
        self.entries
            .iter()
            .map(|(key, value)| {
                serde_json::json!({
                    "key": key.iter().map(Value::to_json).collect::<Vec<_>>(),
                    "value": value.to_json(),
                })
            })
            .collect()
    }
}
