//! Row store configuration
//!
//! Defaults: no secondary indexes, per-query logging at TRACE.

use serde::{Deserialize, Serialize};

use super::errors::{StoreError, StoreResult};
use crate::observability::Severity;

/// Construction-time options for a `RowStore`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Fields that get a secondary index, maintained on every append
    pub index_fields: Vec<String>,
    /// Log routine per-call events at INFO instead of TRACE
    pub log_queries: bool,
}

impl StoreConfig {
    /// Parse a JSON configuration document
    pub fn from_json(text: &str) -> StoreResult<Self> {
        serde_json::from_str(text).map_err(|e| StoreError::Config(e.to_string()))
    }

    /// Add one indexed field
    pub fn with_index(mut self, field: impl Into<String>) -> Self {
        self.index_fields.push(field.into());
        self
    }

    /// Add several indexed fields
    pub fn with_index_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.index_fields.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Enable or disable INFO-level query logging
    pub fn with_query_logging(mut self, enabled: bool) -> Self {
        self.log_queries = enabled;
        self
    }

    /// Severity used for routine events
    pub fn routine_severity(&self) -> Severity {
        if self.log_queries {
            Severity::Info
        } else {
            Severity::Trace
        }
    }
}
