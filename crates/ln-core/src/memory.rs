//! In-memory sink for capturing output in tests and diagnostics screens.

use std::sync::{Arc, Mutex, PoisonError};

use crate::error::LnError;
use crate::format::Format;
use crate::level::Level;
use crate::sink::Sink;

/// Sink that appends every rendered line to a shared buffer.
///
/// Clones share the buffer, so a test keeps one clone and hands the other to
/// the logger.
#[derive(Debug, Clone)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<(Level, String)>>>,
    format: Format,
}

impl MemorySink {
    pub fn new(format: Format) -> Self {
        Self { lines: Arc::new(Mutex::new(Vec::new())), format }
    }

    /// Everything written so far.
    pub fn lines(&self) -> Vec<(Level, String)> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Just the text, concatenated.
    pub fn text(&self) -> String {
        self.lines().into_iter().map(|(_, text)| text).collect()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Sink for MemorySink {
    fn name(&self) -> &str {
        "memory"
    }

    fn format(&self) -> Format {
        self.format
    }

    fn write(&mut self, level: Level, text: &str) -> Result<(), LnError> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((level, text.to_string()));
        Ok(())
    }
}
