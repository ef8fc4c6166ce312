//! The per-call log record.

use chrono::{DateTime, Local};

use crate::level::Level;

/// Where the caller tag of a record comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// Issued through this crate's API; the tag was derived (and padded)
    /// before formatting and is used verbatim.
    Tagged(String),
    /// Arrived through another front end (the `log` crate bridge). Formatters
    /// build the tag from `target` themselves.
    Foreign { target: String },
}

/// One log call, rendered once per sink and then dropped.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub timestamp: DateTime<Local>,
    pub level: Level,
    pub origin: Origin,
    pub message: String,
}

impl LogRecord {
    pub fn new(level: Level, origin: Origin, message: impl Into<String>) -> Self {
        Self { timestamp: Local::now(), level, origin, message: message.into() }
    }

    /// Override the timestamp (tests, replay).
    pub fn at(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }
}
