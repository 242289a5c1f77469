//! Observability subsystem for rowstore
//!
//! - Structured event logging (through `tracing`)
//! - Query counters
//! - Begin/complete scopes around queries
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on query results
//! 3. No background threads

mod events;
mod logger;
mod metrics;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsSnapshot, StoreMetrics};
pub use scope::ObservationScope;

/// Log a lifecycle event with fields.
///
/// Routine events use `routine_severity`; rejections log at WARN and
/// everything else at INFO.
pub fn log_event(event: Event, routine_severity: Severity, fields: &[(&str, &str)]) {
    let severity = match event {
        Event::QueryRejected => Severity::Warn,
        e if e.is_routine() => routine_severity,
        _ => Severity::Info,
    };
    Logger::log(severity, event.as_str(), fields);
}
