//! Observable events for rowstore
//!
//! Events are explicit and typed.

use std::fmt;

/// Observable events in a row store's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Store constructed from caller rows
    StoreCreated,
    /// Secondary index built for a field
    IndexBuilt,
    /// Row appended
    RowAppended,
    /// Filter predicates resolved, scan about to start
    FilterStart,
    /// Query rejected before scanning
    QueryRejected,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::StoreCreated => "STORE_CREATED",
            Event::IndexBuilt => "INDEX_BUILT",
            Event::RowAppended => "ROW_APPENDED",
            Event::FilterStart => "FILTER_BEGIN",
            Event::QueryRejected => "QUERY_REJECTED",
        }
    }

    /// Events emitted once per call or per row rather than once per store
    pub fn is_routine(&self) -> bool {
        matches!(self, Event::FilterStart | Event::RowAppended)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
