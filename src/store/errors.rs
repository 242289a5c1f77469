//! Row store errors
//!
//! Error codes:
//! - ROWSTORE_UNKNOWN_FIELD
//! - ROWSTORE_DUPLICATE_FIELD
//! - ROWSTORE_ARITY_MISMATCH
//! - ROWSTORE_NOT_INDEXED
//! - ROWSTORE_CONFIG_INVALID
//! - plus the codes of wrapped filter and accumulator errors

use thiserror::Error;

use crate::accumulator::AccumulatorError;
use crate::filter::FilterError;

/// Result type for row store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Row store errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Field name not in the schema
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// Field name listed twice in the schema
    #[error("Duplicate field: {0}")]
    DuplicateField(String),

    /// Row length differs from schema length
    #[error("Row {row} has {found} values, schema has {expected} fields")]
    ArityMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Lookup on a field without a secondary index
    #[error("Field is not indexed: {0}")]
    NotIndexed(String),

    /// Malformed configuration document
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    Accumulator(#[from] AccumulatorError),
}

impl StoreError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::UnknownField(_) => "ROWSTORE_UNKNOWN_FIELD",
            StoreError::DuplicateField(_) => "ROWSTORE_DUPLICATE_FIELD",
            StoreError::ArityMismatch { .. } => "ROWSTORE_ARITY_MISMATCH",
            StoreError::NotIndexed(_) => "ROWSTORE_NOT_INDEXED",
            StoreError::Config(_) => "ROWSTORE_CONFIG_INVALID",
            StoreError::Filter(e) => e.code(),
            StoreError::Accumulator(e) => e.code(),
        }
    }
}
