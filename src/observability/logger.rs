//! Structured logger for rowstore
//!
//! Every log line is one event name plus key/value fields in alphabetical
//! key order. Emission goes through `tracing`; the library never installs a
//! subscriber.

use tracing::Level;

/// Severity a store logs at
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Per-query detail
    Trace,
    /// Construction and index builds
    Info,
    /// Rejected or failed queries
    Warn,
}

impl Severity {
    /// Matching `tracing` level
    pub fn level(&self) -> Level {
        match self {
            Severity::Trace => Level::TRACE,
            Severity::Info => Level::INFO,
            Severity::Warn => Level::WARN,
        }
    }
}

/// Structured logger facade
pub struct Logger;

impl Logger {
    /// Emits `event` with `fields` at `severity`
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        let fields = render_fields(fields);
        // tracing macros need a constant level
        match severity {
            Severity::Trace => tracing::trace!(target: "rowstore", event, %fields),
            Severity::Info => tracing::info!(target: "rowstore", event, %fields),
            Severity::Warn => tracing::warn!(target: "rowstore", event, %fields),
        }
    }

    pub fn warn(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Warn, event, fields);
    }
}

/// Renders fields as `key=value` pairs sorted by key, quoting values that
/// are empty or contain whitespace
pub(crate) fn render_fields(fields: &[(&str, &str)]) -> String {
    let mut sorted = fields.to_vec();
    sorted.sort_by_key(|(key, _)| *key);

    sorted
        .into_iter()
        .map(|(key, value)| {
            if value.is_empty() || value.contains(char::is_whitespace) {
                format!("{}={:?}", key, value)
            } else {
                format!("{}={}", key, value)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
