//! Console sink and the host console primitives it can drive.
//!
//! The console sink itself is thin: it picks a severity from the record's
//! level and hands `(severity, tag, text)` to a [`ConsolePrimitive`]. The
//! primitive owns timestamps and presentation.

use std::io::{self, Write};

use chrono::Local;
use serde::Deserialize;

use crate::error::LnError;
use crate::format::Format;
use crate::level::Level;
use crate::sink::Sink;

/// The host's native console output call.
pub trait ConsolePrimitive: Send {
    fn print(&mut self, level: Level, tag: &str, text: &str) -> io::Result<()>;
}

/// Which built-in primitive a config selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleKind {
    /// Events on the installed `tracing` subscriber.
    #[default]
    Tracing,
    /// Logcat-style lines on stderr.
    Stderr,
}

// ---------------------------------------------------------------------------
// Primitives
// ---------------------------------------------------------------------------

/// Emits each line as a `tracing` event. The subscriber installed by
/// [`crate::platform::init_platform_logging`] (or by the host) prints it.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingConsole;

impl ConsolePrimitive for TracingConsole {
    fn print(&mut self, level: Level, tag: &str, text: &str) -> io::Result<()> {
        // `tracing` macros need a constant level, hence the match.
        match level {
            Level::Debug => tracing::debug!(target: "ln", tag, "{text}"),
            Level::Info => tracing::info!(target: "ln", tag, "{text}"),
            Level::Warn => tracing::warn!(target: "ln", tag, "{text}"),
            Level::Error => tracing::error!(target: "ln", tag, "{text}"),
        }
        Ok(())
    }
}

/// Writes `"<HH:MM:SS.mmm> <L>/<tag>: <text>"` to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrConsole;

impl ConsolePrimitive for StderrConsole {
    fn print(&mut self, level: Level, tag: &str, text: &str) -> io::Result<()> {
        let mut err = io::stderr().lock();
        writeln!(err, "{} {}/{tag}: {text}", Local::now().format("%H:%M:%S%.3f"), level.letter())
    }
}

// ---------------------------------------------------------------------------
// Sink
// ---------------------------------------------------------------------------

/// Console sink: console-formatted lines forwarded to a primitive under a
/// fixed console tag.
pub struct ConsoleSink<P: ConsolePrimitive> {
    primitive: P,
    tag: String,
}

impl<P: ConsolePrimitive> ConsoleSink<P> {
    pub fn new(primitive: P, tag: impl Into<String>) -> Self {
        Self { primitive, tag: tag.into() }
    }

    pub fn primitive(&self) -> &P {
        &self.primitive
    }
}

impl<P: ConsolePrimitive> Sink for ConsoleSink<P> {
    fn name(&self) -> &str {
        "console"
    }

    fn format(&self) -> Format {
        Format::Console
    }

    fn write(&mut self, level: Level, text: &str) -> Result<(), LnError> {
        self.primitive
            .print(level, &self.tag, text)
            .map_err(|e| LnError::write(self.name(), e))
    }
}
