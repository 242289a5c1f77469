//! RowStore subsystem
//!
//! Owns rows and schema and answers `filter`, `distinct` and `aggregate`.
//!
//! # Guarantees
//!
//! - Predicates and field names resolve once per call, before scanning
//! - Predicates combine with AND and stop at the first failure per row
//! - `filter` is lazy; every call returns an independent iterator
//! - Results never depend on whether an index was used
//! - Indexes are updated on every `append`

mod config;
mod errors;
mod filtered;
mod index;
mod row_store;
mod schema;

pub use config::StoreConfig;
pub use errors::{StoreError, StoreResult};
pub use filtered::Filtered;
pub use index::FieldIndex;
pub use row_store::RowStore;
pub use schema::{Row, Schema};
