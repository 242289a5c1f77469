//! Predicate translation errors
//!
//! Error codes:
//! - ROWSTORE_UNKNOWN_OPERATOR
//! - ROWSTORE_INVALID_PREDICATE_SHAPE
//! - ROWSTORE_INVALID_VALUE

use thiserror::Error;

/// Result type for predicate translation
pub type FilterResult<T> = Result<T, FilterError>;

/// Errors raised while normalizing or rendering predicates
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// Operator name not in the operator table
    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    /// Predicate is neither a pair nor a triple
    #[error("Invalid predicate shape: {0}")]
    InvalidShape(String),

    /// Operand cannot be represented as a value
    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

impl FilterError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            FilterError::UnknownOperator(_) => "ROWSTORE_UNKNOWN_OPERATOR",
            FilterError::InvalidShape(_) => "ROWSTORE_INVALID_PREDICATE_SHAPE",
            FilterError::InvalidValue(_) => "ROWSTORE_INVALID_VALUE",
        }
    }
}
