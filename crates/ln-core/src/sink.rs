//! Output targets.
//!
//! A sink receives text that its [`Format`] already rendered. Failures are
//! returned to the logger core, which counts and reports them; they never
//! reach the code that issued the log call.

use crate::error::LnError;
use crate::format::Format;
use crate::level::Level;

/// Destination for rendered log lines.
///
/// Only `Send` is required: the logger core serializes every access behind
/// its mutex.
pub trait Sink: Send {
    /// Short name used in failure reports.
    fn name(&self) -> &str;

    /// How records are rendered before reaching [`Sink::write`].
    fn format(&self) -> Format;

    /// Persist or display one rendered record.
    fn write(&mut self, level: Level, text: &str) -> Result<(), LnError>;

    /// Push out anything buffered.
    fn flush(&mut self) -> Result<(), LnError> {
        Ok(())
    }
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn format(&self) -> Format {
        (**self).format()
    }

    fn write(&mut self, level: Level, text: &str) -> Result<(), LnError> {
        (**self).write(level, text)
    }

    fn flush(&mut self) -> Result<(), LnError> {
        (**self).flush()
    }
}
