//! Typed error definitions for the logging facility.
//!
//! [`LnError`] never reaches application code through the logging calls
//! themselves: sink failures are counted and reported on the platform error
//! channel, then dropped. The type surfaces only from setup functions
//! ([`crate::global::init`], [`crate::config::LoggerConfig::validate`],
//! [`crate::file::RotatingFileSink::open`]) and from the [`crate::sink::Sink`]
//! trait, where the logger core consumes it.

use std::io;

use thiserror::Error;

/// Errors produced while building or driving log sinks.
#[derive(Debug, Error)]
pub enum LnError {
    /// A sink could not be constructed (e.g. log directory not writable).
    /// The sink is disabled for the rest of the process.
    #[error("sink '{sink}' failed to initialize: {source}")]
    SinkInit {
        sink: String,
        #[source]
        source: io::Error,
    },

    /// A single write or flush failed. Remaining sinks still run.
    #[error("sink '{sink}' failed to write: {source}")]
    SinkWrite {
        sink: String,
        #[source]
        source: io::Error,
    },

    /// Configuration parsing or validation error.
    #[error("config error: {0}")]
    Config(String),

    /// The process-wide logger was already installed.
    #[error("logger already initialized")]
    AlreadyInitialized,
}

impl LnError {
    pub(crate) fn init(sink: impl Into<String>, source: io::Error) -> Self {
        Self::SinkInit { sink: sink.into(), source }
    }

    pub(crate) fn write(sink: impl Into<String>, source: io::Error) -> Self {
        Self::SinkWrite { sink: sink.into(), source }
    }
}
