//! Accumulator Tests
//!
//! Tests for accumulator invariants:
//! - Filtered kinds register every key they see
//! - Set contents equal the de-duplicated list contents
//! - Sorting is monotonic and stable in both directions

use rowstore::{
    Accumulator, AccumulatorKind, AggregateValue, GroupKey, Operator, Row, RowStore, SortKey,
    Value, NO_PREDICATES,
};
use serde_json::json;

// =============================================================================
// Helper Functions
// =============================================================================

fn port_row(equipment: &str, port: i64, operator: Option<&str>, status: &str) -> Row {
    vec![equipment.into(), port.into(), operator.into(), status.into()]
}

fn ports() -> RowStore {
    let rows = vec![
        port_row("equip1", 0, Some("op1"), "used"),
        port_row("equip1", 1, Some("op1"), "preempted"),
        port_row("equip1", 2, None, "free"),
        port_row("equip1", 3, None, "free"),
        port_row("equip2", 1, None, "free"),
        port_row("equip2", 2, None, "free"),
        port_row("equip3", 0, Some("op2"), "used"),
        port_row("equip3", 1, Some("op1"), "used"),
        port_row("equip3", 2, Some("op2"), "used"),
    ];
    RowStore::new(rows, ["equipment", "port", "operator", "status"]).unwrap()
}

fn key(value: &str) -> GroupKey {
    vec![Value::from(value)]
}

fn count_of(accumulator: &Accumulator, value: &str) -> Option<u64> {
    accumulator.get(&key(value)).and_then(AggregateValue::as_count)
}

// =============================================================================
// Filtered Accumulator Tests
// =============================================================================

/// An outer filter drops equip2 entirely.
#[test]
fn test_outer_filter_drops_groups() {
    let store = ports();
    let result = store
        .aggregate(
            &["equipment"],
            [("status", Accumulator::count())],
            [("status__not", "free"), ("equipment", "equip1")],
        )
        .unwrap();

    assert_eq!(result[0].len(), 1);
    assert_eq!(count_of(&result[0], "equip1"), Some(2));
}

/// FilteredCount keeps equip2 at zero.
#[test]
fn test_filtered_count_keeps_empty_groups() {
    let store = ports();
    let result = store
        .aggregate(
            &["equipment"],
            [("status", Accumulator::filtered_count(Operator::Not, "free"))],
            NO_PREDICATES,
        )
        .unwrap();

    assert_eq!(count_of(&result[0], "equip1"), Some(2));
    assert_eq!(count_of(&result[0], "equip2"), Some(0));
    assert_eq!(count_of(&result[0], "equip3"), Some(3));
}

/// FilteredList and FilteredSet default to empty collections.
#[test]
fn test_filtered_list_and_set_keep_empty_groups() {
    let store = ports();
    let result = store
        .aggregate(
            &["equipment"],
            [
                ("port", Accumulator::filtered_list(Operator::Gte, 2)),
                ("operator", Accumulator::filtered_set(Operator::Not, Value::Null)),
            ],
            NO_PREDICATES,
        )
        .unwrap();

    let ports = &result[0];
    assert_eq!(
        ports.get(&key("equip1")).and_then(AggregateValue::as_list),
        Some(&[Value::Int(2), Value::Int(3)][..])
    );
    assert_eq!(
        ports.get(&key("equip3")).and_then(AggregateValue::as_list),
        Some(&[Value::Int(2)][..])
    );

    let operators = &result[1];
    assert_eq!(operators.get(&key("equip2")).map(AggregateValue::size), Some(0));
    assert_eq!(operators.get(&key("equip3")).map(AggregateValue::size), Some(2));
    assert_eq!(operators.len(), 3);
}

/// The kind is kept on the accumulator for inspection.
#[test]
fn test_kind_is_exposed() {
    let acc = Accumulator::filtered_count(Operator::Not, "free");
    assert_eq!(
        acc.kind(),
        &AccumulatorKind::FilteredCount {
            op: Operator::Not,
            threshold: Value::from("free"),
        }
    );
    assert_eq!(acc.kind().to_string(), "filtered_count(not free)");
}

// =============================================================================
// List / Set Equivalence Tests
// =============================================================================

/// For every key, set members equal the de-duplicated list members.
#[test]
fn test_set_equals_deduplicated_list() {
    let store = ports();
    for predicates in [vec![], vec![("port__lt", 2)]] {
        let result = store
            .aggregate(
                &["equipment"],
                [("operator", Accumulator::list()), ("operator", Accumulator::set())],
                predicates,
            )
            .unwrap();
        let (list, set) = (&result[0], &result[1]);

        assert_eq!(list.len(), set.len());
        for (key, value) in list.iter() {
            let mut deduplicated: Vec<Value> = Vec::new();
            for member in value.as_list().unwrap() {
                if !deduplicated.contains(member) {
                    deduplicated.push(member.clone());
                }
            }
            let members: Vec<Value> = set
                .get(key)
                .and_then(AggregateValue::as_set)
                .unwrap()
                .iter()
                .cloned()
                .collect();
            assert_eq!(members, deduplicated);
        }
    }
}

// =============================================================================
// Sorting Tests
// =============================================================================

fn counts() -> Accumulator {
    let mut acc = Accumulator::count();
    for name in ["b", "a", "c", "a", "d", "c", "e", "c"] {
        acc.observe(&key(name), &Value::Null).unwrap();
    }
    acc
}

fn sort_values(sorted: &[(&GroupKey, &AggregateValue)]) -> Vec<usize> {
    sorted.iter().map(|(_, value)| value.size()).collect()
}

/// Ascending sort is non-decreasing, descending is non-increasing.
#[test]
fn test_sorted_is_monotonic() {
    let acc = counts();

    let ascending = sort_values(&acc.sorted(false));
    assert!(ascending.windows(2).all(|pair| pair[0] <= pair[1]));

    let descending = sort_values(&acc.sorted(true));
    assert!(descending.windows(2).all(|pair| pair[0] >= pair[1]));
}

/// Ties keep first-observation order in both directions.
#[test]
fn test_sorted_ties_keep_insertion_order() {
    let acc = counts();

    let ascending: Vec<GroupKey> = acc.sorted(false).into_iter().map(|(k, _)| k.clone()).collect();
    assert_eq!(ascending, vec![key("b"), key("d"), key("e"), key("a"), key("c")]);

    let descending: Vec<GroupKey> = acc.sorted(true).into_iter().map(|(k, _)| k.clone()).collect();
    assert_eq!(descending, vec![key("c"), key("a"), key("b"), key("d"), key("e")]);
}

/// Repeated sorts produce the same order.
#[test]
fn test_sorted_is_repeatable() {
    let acc = counts();
    let first = acc.sorted(true);
    for _ in 0..5 {
        assert_eq!(acc.sorted(true), first);
    }
}

/// Collection kinds sort by size by default.
#[test]
fn test_sorted_collections_by_size() {
    let store = ports();
    let result = store
        .aggregate(&["equipment"], [("port", Accumulator::list())], NO_PREDICATES)
        .unwrap();

    let order: Vec<GroupKey> = result[0].sorted(true).into_iter().map(|(k, _)| k.clone()).collect();
    assert_eq!(order, vec![key("equip1"), key("equip3"), key("equip2")]);
}

/// Sum accumulators can be sorted by value or by magnitude.
#[test]
fn test_sorted_by_explicit_key() {
    let mut acc = Accumulator::sum();
    acc.observe(&key("x"), &Value::Int(-10)).unwrap();
    acc.observe(&key("y"), &Value::Int(3)).unwrap();

    let by_value: Vec<GroupKey> = acc
        .sorted_by(SortKey::Value, false)
        .into_iter()
        .map(|(k, _)| k.clone())
        .collect();
    assert_eq!(by_value, vec![key("x"), key("y")]);

    let by_size: Vec<GroupKey> = acc
        .sorted_by(SortKey::Size, false)
        .into_iter()
        .map(|(k, _)| k.clone())
        .collect();
    assert_eq!(by_size, vec![key("y"), key("x")]);
}

// =============================================================================
// Export Tests
// =============================================================================

/// Export keeps first-observation order.
#[test]
fn test_export_order() {
    let acc = counts();
    let keys: Vec<GroupKey> = acc.export().into_iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec![key("b"), key("a"), key("c"), key("d"), key("e")]);
}

/// JSON export of an aggregation.
#[test]
fn test_to_json() {
    let store = ports();
    let result = store
        .aggregate(
            &["equipment"],
            [("operator", Accumulator::set())],
            [("operator__not", Value::Null)],
        )
        .unwrap();

    assert_eq!(
        result[0].to_json(),
        json!([
            {"key": ["equip1"], "value": ["op1"]},
            {"key": ["equip3"], "value": ["op2", "op1"]},
        ])
    );
}
