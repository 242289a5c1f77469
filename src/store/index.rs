//! Secondary indexes
//!
//! Each index maps a field value to the ascending positions of the rows
//! holding it. Indexes are derived state: built from the rows at
//! construction and updated on every append.

use std::collections::BTreeMap;

use super::schema::Row;
use crate::value::Value;

/// Index over one column
#[derive(Debug, Clone, Default)]
pub struct FieldIndex {
    /// Column position of the indexed field
    position: usize,
    /// Maps values to sorted row positions
    tree: BTreeMap<Value, Vec<usize>>,
}

impl FieldIndex {
    /// Creates an empty index for the column at `position`
    pub fn new(position: usize) -> Self {
        Self {
            position,
            tree: BTreeMap::new(),
        }
    }

    /// Builds an index over existing rows
    pub fn build(position: usize, rows: &[Row]) -> Self {
        let mut index = Self::new(position);
        for (row_position, row) in rows.iter().enumerate() {
            index.insert_row(row_position, row);
        }
        index
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Records `row` as living at `row_position`.
    ///
    /// Keeps positions sorted ascending.
    pub fn insert_row(&mut self, row_position: usize, row: &[Value]) {
        let Some(value) = row.get(self.position) else {
            return;
        };
        let positions = self.tree.entry(value.clone()).or_default();
        match positions.binary_search(&row_position) {
            Ok(_) => {}
            Err(at) => positions.insert(at, row_position),
        }
    }

    /// Row positions holding exactly `value`, ascending
    pub fn lookup(&self, value: &Value) -> &[usize] {
        self.tree.get(value).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct values
    pub fn key_count(&self) -> usize {
        self.tree.len()
    }

    /// Number of indexed rows
    pub fn row_count(&self) -> usize {
        self.tree.values().map(Vec::len).sum()
    }
}
