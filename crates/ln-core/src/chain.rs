//! Rendering of error values for `error`-level records.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error;
use std::fmt::Write;

/// The error's message followed by one `Caused by:` line per nested source.
pub fn format_error_chain(err: &(dyn Error + 'static)) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let _ = write!(out, "\nCaused by: {cause}");
        source = cause.source();
    }
    out
}

/// `anyhow`'s report rendering: the context chain and, when one was
/// captured at the error's creation, its backtrace.
pub fn format_anyhow(err: &anyhow::Error) -> String {
    format!("{err:?}")
}

/// Append `trace` under a `Stack backtrace:` header if it was captured.
pub fn with_backtrace(mut text: String, trace: &Backtrace) -> String {
    if trace.status() == BacktraceStatus::Captured {
        let _ = write!(text, "\n\nStack backtrace:\n{trace}");
    }
    text
}
