//! Accumulator family
//!
//! Keyed aggregate values driven by `RowStore::aggregate`.
//!
//! | Kind | Update | First sight |
//! |---|---|---|
//! | Count | +1 | 1 |
//! | Sum | + value | value |
//! | List | push | `[value]` |
//! | Set | insert | `{value}` |
//! | Filtered* | as above when `op(value, threshold)` holds | 0 / `[]` / `{}` otherwise |
//!
//! Plain kinds only know keys that had a matching row. Filtered kinds know
//! every key they were shown.

mod accumulator;
mod errors;
mod kind;
mod sort;

pub use accumulator::Accumulator;
pub use errors::{AccumulatorError, AccumulatorResult};
pub use kind::{AccumulatorKind, AggregateValue};
pub use sort::SortKey;
