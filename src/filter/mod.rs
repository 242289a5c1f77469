//! Predicate translation subsystem
//!
//! Turns caller filter expressions into canonical (field, operator, value)
//! predicates and renders them as SQL comparison fragments.
//!
//! # Accepted forms
//!
//! - `(field, value)`: equality
//! - `(field__op, value)`: named operator, `op` one of
//!   `eq not in contains gt lt gte lte`
//! - `(field, op, value)`: already canonical
//!
//! SQL rendering additionally knows `like`, which has no in-memory
//! counterpart.

mod errors;
mod operator;
mod predicate;
mod translator;

pub use errors::{FilterError, FilterResult};
pub use operator::{Operator, SqlOperator};
pub use predicate::{Predicate, PredicateExpr, NO_PREDICATES};
pub use translator::PredicateTranslator;
