//! Compact filter notation translation
//!
//! `field__op` keys carry the operator name after the first `__`. A bare
//! field name means equality.

use super::errors::{FilterError, FilterResult};
use super::operator::{Operator, SqlOperator};
use super::predicate::{Predicate, PredicateExpr};
use crate::value::Value;

const OP_SEPARATOR: &str = "__";

/// Normalizes predicate expressions and renders SQL fragments
pub struct PredicateTranslator;

impl PredicateTranslator {
    /// Normalizes a caller-supplied expression into a canonical predicate.
    ///
    /// Triples pass through unchanged. Unknown operator names fail here.
    pub fn normalize(expr: impl Into<PredicateExpr>) -> FilterResult<Predicate> {
        match expr.into() {
            PredicateExpr::Triple(field, op, value) => Ok(Predicate { field, op, value }),
            PredicateExpr::Pair(key, value) => {
                let (field, op) = match split_key(&key)? {
                    (field, Some(name)) => (field, name.parse::<Operator>()?),
                    (field, None) => (field, Operator::Eq),
                };
                Ok(Predicate {
                    field: field.to_string(),
                    op,
                    value,
                })
            }
        }
    }

    /// Normalizes every expression, failing on the first bad one
    pub fn normalize_all<I, E>(exprs: I) -> FilterResult<Vec<Predicate>>
    where
        I: IntoIterator<Item = E>,
        E: Into<PredicateExpr>,
    {
        exprs.into_iter().map(Self::normalize).collect()
    }

    /// Renders `field OP quoted(value)` from compact notation.
    ///
    /// Integers are rendered bare; everything else is quoted. An `in`
    /// operand is always parenthesized, scalar or list. This is a
    /// formatting helper only, it gives no injection safety.
    pub fn render_sql(key: &str, value: &Value) -> FilterResult<String> {
        let (field, op) = match split_key(key)? {
            (field, Some(name)) => (field, name.parse::<SqlOperator>()?),
            (field, None) => (field, SqlOperator::Eq),
        };
        let operand = match (op, value) {
            (SqlOperator::In, Value::List(_)) => quote(value),
            (SqlOperator::In, scalar) => format!("({})", quote(scalar)),
            _ => quote(value),
        };
        Ok(format!("{}{}{}", field, op.token(), operand))
    }
}

/// Splits `field__op` into its parts
fn split_key(key: &str) -> FilterResult<(&str, Option<&str>)> {
    match key.split_once(OP_SEPARATOR) {
        None => Ok((key, None)),
        Some((field, op)) if field.is_empty() || op.is_empty() || op.contains(OP_SEPARATOR) => {
            Err(FilterError::UnknownOperator(key.to_string()))
        }
        Some((field, op)) => Ok((field, Some(op))),
    }
}

fn quote(value: &Value) -> String {
    match value {
        Value::Int(i) => i.to_string(),
        Value::Null => "NULL".to_string(),
        Value::Bool(b) => format!("'{}'", b),
        Value::Str(s) => format!("'{}'", s.replace('\'', "''")),
        Value::List(items) => {
            let quoted: Vec<String> = items.iter().map(quote).collect();
            format!("({})", quoted.join(", "))
        }
    }
}
