//! rowstore - An in-memory tabular query and aggregation engine
//!
//! Rows are fixed-arity vectors of `Value`s under a `Schema`. A `RowStore`
//! answers predicate filters, distinct projections and grouped aggregations
//! driven by `Accumulator`s.
//!
//! ```
//! use rowstore::{Accumulator, RowStore, Value, NO_PREDICATES};
//!
//! let rows = vec![
//!     vec![Value::from("toto"), Value::Int(12), Value::from("M")],
//!     vec![Value::from("bob"), Value::Int(23), Value::from("M")],
//!     vec![Value::from("bobette"), Value::Int(22), Value::from("F")],
//! ];
//! let store = RowStore::new(rows, ["name", "age", "gender"]).unwrap();
//!
//! let adults = store.filter([("age__gte", 18)]).unwrap().count();
//! assert_eq!(adults, 2);
//!
//! let totals = store
//!     .aggregate(&["gender"], [("age", Accumulator::sum())], NO_PREDICATES)
//!     .unwrap();
//! assert_eq!(totals[0].get(&[Value::from("M")]).and_then(|v| v.as_sum()), Some(35));
//! ```

pub mod accumulator;
pub mod filter;
pub mod observability;
pub mod store;
pub mod value;

pub use accumulator::{Accumulator, AccumulatorError, AccumulatorKind, AggregateValue, SortKey};
pub use filter::{FilterError, Operator, Predicate, PredicateExpr, PredicateTranslator, NO_PREDICATES};
pub use store::{Filtered, Row, RowStore, Schema, StoreConfig, StoreError, StoreResult};
pub use value::{GroupKey, Value};
