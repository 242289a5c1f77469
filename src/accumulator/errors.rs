//! Accumulator errors
//!
//! Error codes:
//! - ROWSTORE_NON_NUMERIC
//! - ROWSTORE_SUM_OVERFLOW

use thiserror::Error;

use crate::value::Value;

/// Result type for accumulator updates
pub type AccumulatorResult<T> = Result<T, AccumulatorError>;

/// Errors raised while folding a value into an accumulator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccumulatorError {
    /// Sum received a value that is not an integer
    #[error("Cannot sum {} value: {value}", .value.type_name())]
    NonNumeric { value: Value },

    /// Running total left the i64 range
    #[error("Sum overflow for group {key:?}")]
    Overflow { key: Vec<Value> },
}

impl AccumulatorError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            AccumulatorError::NonNumeric { .. } => "ROWSTORE_NON_NUMERIC",
            AccumulatorError::Overflow { .. } => "ROWSTORE_SUM_OVERFLOW",
        }
    }
}
