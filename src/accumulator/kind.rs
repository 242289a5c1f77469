//! Accumulator kinds and aggregate values

use std::fmt;

use indexmap::IndexSet;

use super::errors::{AccumulatorError, AccumulatorResult};
use super::sort::SortKey;
use crate::filter::Operator;
use crate::value::Value;

/// The closed set of aggregate kinds.
///
/// Filtered kinds gate the value update on `op(value, threshold)` but still
/// register every key they see, at zero or empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccumulatorKind {
    Count,
    Sum,
    List,
    Set,
    FilteredCount { op: Operator, threshold: Value },
    FilteredList { op: Operator, threshold: Value },
    FilteredSet { op: Operator, threshold: Value },
}

impl AccumulatorKind {
    /// Kind name for logs
    pub fn name(&self) -> &'static str {
        match self {
            AccumulatorKind::Count => "count",
            AccumulatorKind::Sum => "sum",
            AccumulatorKind::List => "list",
            AccumulatorKind::Set => "set",
            AccumulatorKind::FilteredCount { .. } => "filtered_count",
            AccumulatorKind::FilteredList { .. } => "filtered_list",
            AccumulatorKind::FilteredSet { .. } => "filtered_set",
        }
    }

    /// Secondary predicate of the filtered kinds
    pub fn gate(&self) -> Option<(Operator, &Value)> {
        match self {
            AccumulatorKind::FilteredCount { op, threshold }
            | AccumulatorKind::FilteredList { op, threshold }
            | AccumulatorKind::FilteredSet { op, threshold } => Some((*op, threshold)),
            _ => None,
        }
    }

    /// Sort key used by `sorted`
    pub fn default_sort_key(&self) -> SortKey {
        match self {
            AccumulatorKind::Count | AccumulatorKind::Sum | AccumulatorKind::FilteredCount { .. } => {
                SortKey::Value
            }
            _ => SortKey::Size,
        }
    }

    /// Value registered for a key whose rows never passed the gate
    pub(super) fn empty_value(&self) -> AggregateValue {
        match self {
            AccumulatorKind::Count | AccumulatorKind::FilteredCount { .. } => AggregateValue::Count(0),
            AccumulatorKind::Sum => AggregateValue::Sum(0),
            AccumulatorKind::List | AccumulatorKind::FilteredList { .. } => {
                AggregateValue::List(Vec::new())
            }
            AccumulatorKind::Set | AccumulatorKind::FilteredSet { .. } => {
                AggregateValue::Set(IndexSet::new())
            }
        }
    }

    /// Value registered on the first observation of a key
    pub(super) fn first_value(&self, value: &Value) -> AccumulatorResult<AggregateValue> {
        match self {
            AccumulatorKind::Sum => Ok(AggregateValue::Sum(numeric(value)?)),
            _ => {
                let mut fresh = self.empty_value();
                fresh.fold(value, &[])?;
                Ok(fresh)
            }
        }
    }
}

impl fmt::Display for AccumulatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.gate() {
            Some((op, threshold)) => write!(f, "{}({} {})", self.name(), op, threshold),
            None => write!(f, "{}", self.name()),
        }
    }
}

/// The per-key aggregate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregateValue {
    Count(u64),
    Sum(i64),
    List(Vec<Value>),
    Set(IndexSet<Value>),
}

impl AggregateValue {
    pub fn as_count(&self) -> Option<u64> {
        match self {
            AggregateValue::Count(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_sum(&self) -> Option<i64> {
        match self {
            AggregateValue::Sum(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            AggregateValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_set(&self) -> Option<&IndexSet<Value>> {
        match self {
            AggregateValue::Set(items) => Some(items),
            _ => None,
        }
    }

    /// Number of collected members; counts and sums report their magnitude
    pub fn size(&self) -> usize {
        match self {
            AggregateValue::Count(n) => *n as usize,
            AggregateValue::Sum(n) => n.unsigned_abs() as usize,
            AggregateValue::List(items) => items.len(),
            AggregateValue::Set(items) => items.len(),
        }
    }

    /// Folds one more observation into the aggregate
    pub(super) fn fold(&mut self, value: &Value, key: &[Value]) -> AccumulatorResult<()> {
        match self {
            AggregateValue::Count(n) => *n += 1,
            AggregateValue::Sum(total) => {
                *total = total
                    .checked_add(numeric(value)?)
                    .ok_or_else(|| AccumulatorError::Overflow { key: key.to_vec() })?;
            }
            AggregateValue::List(items) => items.push(value.clone()),
            AggregateValue::Set(items) => {
                items.insert(value.clone());
            }
        }
        Ok(())
    }

    /// Converts to a JSON value
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            AggregateValue::Count(n) => serde_json::Value::from(*n),
            AggregateValue::Sum(n) => serde_json::Value::from(*n),
            AggregateValue::List(items) => items.iter().map(Value::to_json).collect(),
            AggregateValue::Set(items) => items.iter().map(Value::to_json).collect(),
        }
    }
}

fn numeric(value: &Value) -> AccumulatorResult<i64> {
    value.as_int().ok_or_else(|| AccumulatorError::NonNumeric {
        value: value.clone(),
    })
}
