//! Comparison operators
//!
//! `Operator` is the in-memory evaluation set. `SqlOperator` is the textual
//! rendering set; it adds `like` and has no `contains`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::errors::FilterError;
use crate::value::Value;

/// In-memory comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Equality (default)
    Eq,
    /// Inequality
    Not,
    /// Row value is a member of the operand
    In,
    /// Row value contains the operand
    Contains,
    /// Greater than
    Gt,
    /// Less than
    Lt,
    /// Greater than or equal
    Gte,
    /// Less than or equal
    Lte,
}

impl Operator {
    /// Get the operator name used in `field__op` notation
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Not => "not",
            Operator::In => "in",
            Operator::Contains => "contains",
            Operator::Gt => "gt",
            Operator::Lt => "lt",
            Operator::Gte => "gte",
            Operator::Lte => "lte",
        }
    }

    /// Evaluates `actual <op> operand`.
    ///
    /// Ordering operators only compare like-typed ints, strings, or bools.
    /// Mismatched types evaluate to false.
    pub fn evaluate(&self, actual: &Value, operand: &Value) -> bool {
        match self {
            Operator::Eq => actual == operand,
            Operator::Not => actual != operand,
            Operator::In => member_of(actual, operand),
            Operator::Contains => member_of(operand, actual),
            Operator::Gt => compare(actual, operand) == Some(Ordering::Greater),
            Operator::Lt => compare(actual, operand) == Some(Ordering::Less),
            Operator::Gte => matches!(
                compare(actual, operand),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Operator::Lte => matches!(
                compare(actual, operand),
                Some(Ordering::Less | Ordering::Equal)
            ),
        }
    }
}

impl FromStr for Operator {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eq" => Ok(Operator::Eq),
            "not" => Ok(Operator::Not),
            "in" => Ok(Operator::In),
            "contains" => Ok(Operator::Contains),
            "gt" => Ok(Operator::Gt),
            "lt" => Ok(Operator::Lt),
            "gte" => Ok(Operator::Gte),
            "lte" => Ok(Operator::Lte),
            other => Err(FilterError::UnknownOperator(other.to_string())),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Operators available when rendering SQL fragments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlOperator {
    Eq,
    Not,
    In,
    Like,
    Gt,
    Lt,
    Gte,
    Lte,
}

impl SqlOperator {
    /// SQL token placed between field and operand
    pub fn token(&self) -> &'static str {
        match self {
            SqlOperator::Eq => "=",
            SqlOperator::Not => "<>",
            SqlOperator::In => " IN ",
            SqlOperator::Like => " LIKE ",
            SqlOperator::Gt => ">",
            SqlOperator::Lt => "<",
            SqlOperator::Gte => ">=",
            SqlOperator::Lte => "<=",
        }
    }
}

impl FromStr for SqlOperator {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eq" => Ok(SqlOperator::Eq),
            "not" => Ok(SqlOperator::Not),
            "in" => Ok(SqlOperator::In),
            "like" => Ok(SqlOperator::Like),
            "gt" => Ok(SqlOperator::Gt),
            "lt" => Ok(SqlOperator::Lt),
            "gte" => Ok(SqlOperator::Gte),
            "lte" => Ok(SqlOperator::Lte),
            other => Err(FilterError::UnknownOperator(other.to_string())),
        }
    }
}

/// Same-type ordering, `None` when the pair is not comparable
fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// `needle` is a member of list `haystack`, or a substring of string `haystack`
fn member_of(needle: &Value, haystack: &Value) -> bool {
    match (needle, haystack) {
        (_, Value::List(items)) => items.contains(needle),
        (Value::Str(n), Value::Str(h)) => h.contains(n.as_str()),
        _ => false,
    }
}
