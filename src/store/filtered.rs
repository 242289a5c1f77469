//! Lazy predicate filtering
//!
//! Predicates are resolved to column positions once per call. The scan then
//! pulls one candidate row at a time and keeps it only if every predicate
//! holds (AND, stopping at the first failure).

use std::iter::FusedIterator;
use std::ops::Range;
use std::slice;

use super::schema::{Row, Schema};
use super::errors::StoreResult;
use crate::filter::Predicate;
use crate::observability::StoreMetrics;
use crate::value::Value;

/// A predicate bound to a column position
#[derive(Debug, Clone)]
pub struct ResolvedPredicate {
    position: usize,
    predicate: Predicate,
}

impl ResolvedPredicate {
    /// Binds `predicate` to its column, failing on unknown fields
    pub fn resolve(schema: &Schema, predicate: Predicate) -> StoreResult<Self> {
        let position = schema.position(&predicate.field)?;
        Ok(Self {
            position,
            predicate,
        })
    }

    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    /// Checks one row
    pub fn matches(&self, row: &[Value]) -> bool {
        row.get(self.position)
            .is_some_and(|value| self.predicate.matches(value))
    }
}

/// Row positions a scan visits, in ascending order
#[derive(Debug, Clone)]
pub(crate) enum Candidates<'a> {
    /// Every row
    All(Range<usize>),
    /// Rows listed by a secondary index
    Indexed(slice::Iter<'a, usize>),
}

impl Iterator for Candidates<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        match self {
            Candidates::All(range) => range.next(),
            Candidates::Indexed(positions) => positions.next().copied(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Candidates::All(range) => range.size_hint(),
            Candidates::Indexed(positions) => positions.size_hint(),
        }
    }
}

/// Single-pass lazy sequence of rows passing every predicate.
///
/// Each `RowStore::filter` call returns an independent instance.
pub struct Filtered<'a> {
    rows: &'a [Row],
    candidates: Candidates<'a>,
    predicates: Vec<ResolvedPredicate>,
    metrics: &'a StoreMetrics,
}

impl<'a> Filtered<'a> {
    pub(crate) fn new(
        rows: &'a [Row],
        candidates: Candidates<'a>,
        predicates: Vec<ResolvedPredicate>,
        metrics: &'a StoreMetrics,
    ) -> Self {
        Self {
            rows,
            candidates,
            predicates,
            metrics,
        }
    }

    /// Checks if a row matches all predicates
    fn matches(&self, row: &[Value]) -> bool {
        self.predicates.iter().all(|p| p.matches(row))
    }
}

impl<'a> Iterator for Filtered<'a> {
    type Item = &'a Row;

    fn next(&mut self) -> Option<&'a Row> {
        while let Some(position) = self.candidates.next() {
            let Some(row) = self.rows.get(position) else {
                continue;
            };
            self.metrics.increment_rows_scanned();
            if self.matches(row) {
                self.metrics.increment_rows_matched();
                return Some(row);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.candidates.size_hint().1)
    }
}

impl FusedIterator for Filtered<'_> {}
