//! Query counters for a row store
//!
//! - Counters only, monotonic
//! - Relaxed atomics; exact values are not synchronized with queries

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operational counters owned by one `RowStore`
#[derive(Debug, Default)]
pub struct StoreMetrics {
    /// Successful filter/distinct/aggregate calls
    queries_executed: AtomicU64,
    /// Calls rejected during predicate or field resolution
    queries_rejected: AtomicU64,
    /// Rows examined by scans
    rows_scanned: AtomicU64,
    /// Rows that passed every predicate
    rows_matched: AtomicU64,
    /// Rows appended after construction
    rows_appended: AtomicU64,
}

impl StoreMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_queries_executed(&self) {
        self.queries_executed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_queries_rejected(&self) {
        self.queries_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_rows_scanned(&self) {
        self.rows_scanned.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_rows_matched(&self) {
        self.rows_matched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_rows_appended(&self) {
        self.rows_appended.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of all counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            queries_executed: self.queries_executed.load(Ordering::Relaxed),
            queries_rejected: self.queries_rejected.load(Ordering::Relaxed),
            rows_scanned: self.rows_scanned.load(Ordering::Relaxed),
            rows_matched: self.rows_matched.load(Ordering::Relaxed),
            rows_appended: self.rows_appended.load(Ordering::Relaxed),
        }
    }
}

/// Counter values at one point in time
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub queries_executed: u64,
    pub queries_rejected: u64,
    pub rows_scanned: u64,
    pub rows_matched: u64,
    pub rows_appended: u64,
}

impl MetricsSnapshot {
    /// Converts to a JSON object keyed by counter name
    pub fn to_json(&self) -> serde_json::Value {
        // Plain integer fields always serialize
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
