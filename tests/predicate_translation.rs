//! Predicate Translation Tests
//!
//! Tests for translation invariants:
//! - Compact notation normalizes to canonical triples
//! - Unknown operators fail immediately
//! - Malformed shapes are rejected, never destructured
//! - SQL fragments follow the quoting convention

use rowstore::filter::SqlOperator;
use rowstore::{FilterError, Operator, Predicate, PredicateExpr, PredicateTranslator, Value};
use serde_json::json;

// =============================================================================
// Normalization Tests
// =============================================================================

/// Every operator name round-trips through the suffix notation.
#[test]
fn test_all_operator_suffixes() {
    let names = ["eq", "not", "in", "contains", "gt", "lt", "gte", "lte"];
    for name in names {
        let predicate = PredicateTranslator::normalize((format!("port__{}", name), 1)).unwrap();
        assert_eq!(predicate.field, "port");
        assert_eq!(predicate.op.as_str(), name);
    }
}

/// A bare field name means equality.
#[test]
fn test_bare_field_is_equality() {
    let predicate = PredicateTranslator::normalize(("status", "free")).unwrap();
    assert_eq!(predicate, Predicate::new("status", Operator::Eq, "free"));
}

/// Null operands survive normalization.
#[test]
fn test_not_null() {
    let predicate = PredicateTranslator::normalize(("operator__not", Value::Null)).unwrap();
    assert_eq!(predicate.op, Operator::Not);
    assert!(predicate.value.is_null());
}

/// Canonical triples are returned unchanged.
#[test]
fn test_triple_passthrough() {
    let triple = Predicate::new("age", Operator::Gte, 18);
    assert_eq!(PredicateTranslator::normalize(triple.clone()).unwrap(), triple);
}

/// Unknown suffixes are errors, not equality.
#[test]
fn test_unknown_operator() {
    let err = PredicateTranslator::normalize(("age__approx", 3)).unwrap_err();
    assert_eq!(err, FilterError::UnknownOperator("approx".into()));
    assert_eq!(err.code(), "ROWSTORE_UNKNOWN_OPERATOR");
}

/// `like` is a rendering operator only.
#[test]
fn test_like_not_evaluable() {
    assert!(PredicateTranslator::normalize(("name__like", "bo%")).is_err());
    assert!("like".parse::<SqlOperator>().is_ok());
}

/// The whole list fails on the first bad expression.
#[test]
fn test_normalize_all() {
    let predicates = PredicateTranslator::normalize_all([("a", 1), ("b__lt", 2)]).unwrap();
    assert_eq!(predicates.len(), 2);
    assert_eq!(predicates[1].op, Operator::Lt);

    assert!(PredicateTranslator::normalize_all([("a", 1), ("b__xx", 2)]).is_err());
}

// =============================================================================
// Shape Tests
// =============================================================================

/// JSON pairs and triples normalize to the same predicate.
#[test]
fn test_json_forms_agree() {
    let pair = PredicateExpr::from_json(&json!(["age__gte", 18])).unwrap();
    let triple = PredicateExpr::from_json(&json!(["age", "gte", 18])).unwrap();
    assert_eq!(
        PredicateTranslator::normalize(pair).unwrap(),
        PredicateTranslator::normalize(triple).unwrap()
    );
}

/// Neither two nor three elements is an invalid shape.
#[test]
fn test_invalid_shapes() {
    for expr in [json!([]), json!(["age"]), json!(["age", "gt", 1, 2]), json!({"age": 1})] {
        let err = PredicateExpr::from_json(&expr).unwrap_err();
        assert!(matches!(err, FilterError::InvalidShape(_)), "{}", expr);
        assert_eq!(err.code(), "ROWSTORE_INVALID_PREDICATE_SHAPE");
    }
}

/// Floats have no value counterpart.
#[test]
fn test_float_operand_rejected() {
    let err = PredicateExpr::from_json(&json!(["age", 1.5])).unwrap_err();
    assert!(matches!(err, FilterError::InvalidValue(_)));
}

/// List operands parse for `in`.
#[test]
fn test_json_list_operand() {
    let expr = PredicateExpr::from_json(&json!(["port__in", [1, 2]])).unwrap();
    let predicate = PredicateTranslator::normalize(expr).unwrap();
    assert!(predicate.matches(&Value::Int(2)));
    assert!(!predicate.matches(&Value::Int(3)));
}

// =============================================================================
// Evaluation Tests
// =============================================================================

/// Substring semantics of `in` and `contains` on strings.
#[test]
fn test_in_and_contains_on_strings() {
    let within = Predicate::new("name", Operator::In, "bobette");
    assert!(within.matches(&Value::from("bob")));
    assert!(!within.matches(&Value::from("alice")));

    let contains = Predicate::new("name", Operator::Contains, "bet");
    assert!(contains.matches(&Value::from("bobette")));
    assert!(!contains.matches(&Value::from("bob")));
}

/// Ordering operators on strings are lexicographic.
#[test]
fn test_string_ordering() {
    assert!(Operator::Gt.evaluate(&Value::from("b"), &Value::from("a")));
    assert!(Operator::Lte.evaluate(&Value::from("a"), &Value::from("a")));
    assert!(!Operator::Lt.evaluate(&Value::Null, &Value::Int(1)));
}

// =============================================================================
// SQL Rendering Tests
// =============================================================================

/// Integers bare, everything else quoted.
#[test]
fn test_render_sql() {
    let cases = [
        ("port", Value::Int(3), "port=3"),
        ("port__lt", Value::Int(3), "port<3"),
        ("port__lte", Value::Int(-1), "port<=-1"),
        ("status", Value::from("free"), "status='free'"),
        ("status__not", Value::from("free"), "status<>'free'"),
        ("name__like", Value::from("bo%"), "name LIKE 'bo%'"),
        ("name", Value::from("it's"), "name='it''s'"),
        ("operator", Value::Null, "operator=NULL"),
        ("port__in", Value::from(vec![1, 2, 3]), "port IN (1, 2, 3)"),
        ("port__in", Value::Int(3), "port IN (3)"),
    ];
    for (key, value, expected) in cases {
        assert_eq!(PredicateTranslator::render_sql(key, &value).unwrap(), expected);
    }
}

/// `contains` has no SQL form.
#[test]
fn test_render_sql_rejects_contains() {
    let err = PredicateTranslator::render_sql("name__contains", &Value::from("x")).unwrap_err();
    assert!(matches!(err, FilterError::UnknownOperator(_)));
}
