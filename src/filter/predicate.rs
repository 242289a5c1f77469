//! Predicate forms
//!
//! Callers supply `PredicateExpr` in compact notation; the translator turns
//! each one into a canonical `Predicate`.

use serde_json::Value as JsonValue;

use super::errors::{FilterError, FilterResult};
use super::operator::Operator;
use crate::value::Value;

/// Canonical (field, operator, value) triple
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    /// Field name
    pub field: String,
    /// Comparison operator
    pub op: Operator,
    /// Operand
    pub value: Value,
}

impl Predicate {
    pub fn new(field: impl Into<String>, op: Operator, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    /// Returns true if this is an equality predicate
    pub fn is_equality(&self) -> bool {
        self.op == Operator::Eq
    }

    /// Evaluates the predicate against a field value
    pub fn matches(&self, actual: &Value) -> bool {
        self.op.evaluate(actual, &self.value)
    }
}

/// Empty predicate list, for unfiltered queries
pub const NO_PREDICATES: [PredicateExpr; 0] = [];

/// A predicate as supplied by a caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredicateExpr {
    /// `(field, value)` or `(field__op, value)`
    Pair(String, Value),
    /// Already canonical `(field, op, value)`
    Triple(String, Operator, Value),
}

impl PredicateExpr {
    /// Parses a JSON array of two or three elements.
    ///
    /// `["age__gt", 18]` and `["age", "gt", 18]` are equivalent. The operator
    /// of a triple is looked up immediately.
    pub fn from_json(expr: &JsonValue) -> FilterResult<Self> {
        let items = expr
            .as_array()
            .ok_or_else(|| FilterError::InvalidShape(format!("expected array, got {}", expr)))?;

        match items.as_slice() {
            [field, value] => Ok(PredicateExpr::Pair(
                json_str(field, "field")?.to_string(),
                Value::from_json(value)?,
            )),
            [field, op, value] => Ok(PredicateExpr::Triple(
                json_str(field, "field")?.to_string(),
                json_str(op, "operator")?.parse()?,
                Value::from_json(value)?,
            )),
            other => Err(FilterError::InvalidShape(format!(
                "expected 2 or 3 elements, got {}",
                other.len()
            ))),
        }
    }
}

fn json_str<'a>(value: &'a JsonValue, what: &str) -> FilterResult<&'a str> {
    value
        .as_str()
        .ok_or_else(|| FilterError::InvalidShape(format!("{} must be a string, got {}", what, value)))
}

impl<V: Into<Value>> From<(&str, V)> for PredicateExpr {
    fn from((field, value): (&str, V)) -> Self {
        PredicateExpr::Pair(field.to_string(), value.into())
    }
}

impl<V: Into<Value>> From<(String, V)> for PredicateExpr {
    fn from((field, value): (String, V)) -> Self {
        PredicateExpr::Pair(field, value.into())
    }
}

impl<V: Into<Value>> From<(&str, Operator, V)> for PredicateExpr {
    fn from((field, op, value): (&str, Operator, V)) -> Self {
        PredicateExpr::Triple(field.to_string(), op, value.into())
    }
}

impl From<Predicate> for PredicateExpr {
    fn from(p: Predicate) -> Self {
        PredicateExpr::Triple(p.field, p.op, p.value)
    }
}
