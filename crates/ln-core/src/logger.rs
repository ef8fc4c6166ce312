//! Logger core: level filtering and fan-out to sinks.
//!
//! A [`Logger`] owns its sinks and all mutable formatting state (tag column
//! width, previous file timestamp, rotation state inside the file sink)
//! behind one mutex. The message text is rendered before the lock is taken
//! (so a `Display` impl may log); tag derivation, formatting and writing for
//! one call then happen under that lock, so concurrent callers never
//! interleave partial lines or see inconsistent tag padding.
//!
//! Logging is best-effort. A failing sink is counted, reported through
//! `tracing`, and skipped; the caller never sees the error.

use std::backtrace::Backtrace;
use std::error::Error;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{error, warn};

use crate::chain::{format_anyhow, format_error_chain, with_backtrace};
use crate::config::LoggerConfig;
use crate::console::{ConsoleKind, ConsoleSink, StderrConsole, TracingConsole};
use crate::error::LnError;
use crate::file::RotatingFileSink;
use crate::format::FormatState;
use crate::level::Level;
use crate::record::{LogRecord, Origin};
use crate::sink::Sink;
use crate::tag::CallSite;

struct Inner {
    format: FormatState,
    sinks: Vec<Box<dyn Sink>>,
}

/// The logging pipeline for one sink set.
pub struct Logger {
    min_level: Level,
    has_sinks: bool,
    inner: Mutex<Inner>,
    failures: AtomicU64,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("min_level", &self.min_level)
            .field("has_sinks", &self.has_sinks)
            .field("failures", &self.failure_count())
            .finish()
    }
}

impl Logger {
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    /// Build the sinks a config enables.
    ///
    /// A sink that cannot be constructed is reported once and stays disabled
    /// for the lifetime of this logger; the others still work.
    pub fn from_config(config: &LoggerConfig) -> Self {
        let mut builder = Self::builder()
            .min_level(config.min_level)
            .left_justify(config.left_justify_tags);
        let mut failures = 0;

        if config.enable_console_sink {
            builder = match config.console {
                ConsoleKind::Tracing => builder.sink(ConsoleSink::new(TracingConsole, &config.console_tag)),
                ConsoleKind::Stderr => builder.sink(ConsoleSink::new(StderrConsole, &config.console_tag)),
            };
        }

        if config.enable_file_sink {
            match RotatingFileSink::open(
                &config.file_path_template,
                config.max_file_bytes,
                config.max_file_count,
            ) {
                Ok(sink) => builder = builder.sink(sink),
                Err(e) => {
                    error!(error = %e, template = %config.file_path_template, "file sink disabled");
                    failures += 1;
                }
            }
        }

        let logger = builder.build();
        logger.failures.fetch_add(failures, Ordering::Relaxed);
        logger
    }

    pub fn min_level(&self) -> Level {
        self.min_level
    }

    /// Whether a record at `level` would reach any sink.
    ///
    /// Cheap; call sites check it before deriving tags or formatting.
    #[inline]
    pub fn is_enabled(&self, level: Level) -> bool {
        self.has_sinks && level >= self.min_level
    }

    /// Number of sink failures since construction (init and write).
    pub fn failure_count(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    /// Log `args` at `level` on behalf of `site`.
    ///
    /// A missing `site` is tagged with [`CallSite::UNKNOWN`].
    pub fn log(&self, level: Level, site: Option<&CallSite>, args: fmt::Arguments<'_>) {
        if !self.is_enabled(level) {
            return;
        }
        // Render before locking: a `Display` impl may itself log.
        let message = fmt::format(args);
        let mut inner = self.lock();
        let justify = inner.format.left_justify();
        let tag = inner.format.tags.derive(site, justify);
        let record = LogRecord::new(level, Origin::Tagged(tag), message);
        self.dispatch(&mut inner, &record);
    }

    /// Log a record that arrived through another front end. The formatters
    /// build its tag from `target`.
    pub fn log_foreign(&self, level: Level, target: &str, args: fmt::Arguments<'_>) {
        if !self.is_enabled(level) {
            return;
        }
        let message = fmt::format(args);
        let mut inner = self.lock();
        let record = LogRecord::new(level, Origin::Foreign { target: target.to_string() }, message);
        self.dispatch(&mut inner, &record);
    }

    #[track_caller]
    pub fn debug(&self, msg: impl fmt::Display) {
        self.log_tracked(Level::Debug, msg);
    }

    #[track_caller]
    pub fn info(&self, msg: impl fmt::Display) {
        self.log_tracked(Level::Info, msg);
    }

    #[track_caller]
    pub fn warn(&self, msg: impl fmt::Display) {
        self.log_tracked(Level::Warn, msg);
    }

    #[track_caller]
    pub fn error(&self, msg: impl fmt::Display) {
        self.log_tracked(Level::Error, msg);
    }

    /// Log an error value with its whole source chain at `Error`, followed
    /// by a backtrace of this call when `RUST_BACKTRACE` enables capture.
    #[track_caller]
    pub fn error_cause(&self, err: &(dyn Error + 'static)) {
        if self.is_enabled(Level::Error) {
            let site = CallSite::caller();
            let text = with_backtrace(format_error_chain(err), &Backtrace::capture());
            self.log(Level::Error, Some(&site), format_args!("{text}"));
        }
    }

    /// Log an `anyhow::Error` at `Error`: its context chain plus the
    /// backtrace captured where the error was created, if any.
    #[track_caller]
    pub fn error_anyhow(&self, err: &anyhow::Error) {
        if self.is_enabled(Level::Error) {
            let site = CallSite::caller();
            self.log(Level::Error, Some(&site), format_args!("{}", format_anyhow(err)));
        }
    }

    /// Flush every sink. Failures are reported like write failures.
    pub fn flush(&self) {
        let mut inner = self.lock();
        for sink in inner.sinks.iter_mut() {
            if let Err(e) = sink.flush() {
                self.report(&e);
            }
        }
    }

    #[track_caller]
    fn log_tracked(&self, level: Level, msg: impl fmt::Display) {
        if self.is_enabled(level) {
            let site = CallSite::caller();
            self.log(level, Some(&site), format_args!("{msg}"));
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A panic inside a sink must not disable logging for everyone else.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn dispatch(&self, inner: &mut Inner, record: &LogRecord) {
        let Inner { format, sinks } = inner;
        for sink in sinks.iter_mut() {
            let text = sink.format().render(record, format);
            if let Err(e) = sink.write(record.level, &text) {
                self.report(&e);
            }
        }
    }

    fn report(&self, e: &LnError) {
        self.failures.fetch_add(1, Ordering::Relaxed);
        warn!(error = %e, "log sink failure");
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.flush();
    }
}

/// Assembles a [`Logger`] from explicit sinks.
pub struct LoggerBuilder {
    min_level: Level,
    left_justify: bool,
    sinks: Vec<Box<dyn Sink>>,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self { min_level: Level::Debug, left_justify: true, sinks: Vec::new() }
    }
}

impl LoggerBuilder {
    pub fn min_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    pub fn left_justify(mut self, enabled: bool) -> Self {
        self.left_justify = enabled;
        self
    }

    pub fn sink(mut self, sink: impl Sink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn build(self) -> Logger {
        Logger {
            min_level: self.min_level,
            has_sinks: !self.sinks.is_empty(),
            inner: Mutex::new(Inner { format: FormatState::new(self.left_justify), sinks: self.sinks }),
            failures: AtomicU64::new(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::Format;
    use crate::memory::MemorySink;
    use std::io;

    struct FailingSink;

    impl Sink for FailingSink {
        fn name(&self) -> &str {
            "failing"
        }

        fn format(&self) -> Format {
            Format::Console
        }

        fn write(&mut self, _: Level, _: &str) -> Result<(), LnError> {
            Err(LnError::write("failing", io::Error::other("disk on fire")))
        }
    }

    fn site(ident: &'static str) -> CallSite {
        CallSite::new(ident, 1)
    }

    #[test]
    fn below_min_level_reaches_no_sink() {
        let mem = MemorySink::new(Format::Console);
        let logger = Logger::builder().min_level(Level::Warn).sink(mem.clone()).build();
        logger.log(Level::Debug, Some(&site("a")), format_args!("dropped"));
        logger.log(Level::Info, Some(&site("a")), format_args!("dropped"));
        assert!(mem.is_empty());
        logger.log(Level::Warn, Some(&site("a")), format_args!("kept"));
        logger.log(Level::Error, Some(&site("a")), format_args!("kept"));
        assert_eq!(mem.len(), 2);
    }

    #[test]
    fn filtered_calls_do_not_widen_tags() {
        let mem = MemorySink::new(Format::Console);
        let logger = Logger::builder().min_level(Level::Info).sink(mem.clone()).build();
        logger.log(Level::Debug, Some(&site("a_really_long_identifier")), format_args!("x"));
        logger.log(Level::Info, Some(&site("ab")), format_args!("y"));
        assert_eq!(mem.text(), "ab:1   y");
    }

    #[test]
    fn tags_pad_to_widest_seen() {
        let mem = MemorySink::new(Format::Console);
        let logger = Logger::builder().sink(mem.clone()).build();
        logger.log(Level::Info, Some(&CallSite::new("a", 1)), format_args!("one"));
        logger.log(Level::Info, Some(&CallSite::new("abcdef", 1)), format_args!("two"));
        logger.log(Level::Info, Some(&CallSite::new("a", 1)), format_args!("three"));
        let lines: Vec<String> = mem.lines().into_iter().map(|(_, t)| t).collect();
        assert_eq!(lines, vec!["a:1   one", "abcdef:1   two", "     a:1   three"]);
    }

    #[test]
    fn fans_out_to_every_sink_with_its_format() {
        let console = MemorySink::new(Format::Console);
        let file = MemorySink::new(Format::File);
        let logger = Logger::builder().left_justify(false).sink(console.clone()).sink(file.clone()).build();
        logger.log(Level::Warn, Some(&site("svc")), format_args!("disk {}% full", 91));

        assert_eq!(console.lines(), vec![(Level::Warn, "svc:1   disk 91% full".to_string())]);
        let file_line = file.text();
        assert!(file_line.ends_with(" WARN svc:1   disk 91% full\n"), "{file_line}");
    }

    #[test]
    fn sink_failure_is_swallowed_and_counted() {
        let mem = MemorySink::new(Format::Console);
        let logger = Logger::builder().sink(FailingSink).sink(mem.clone()).build();
        logger.error("still delivered");
        assert_eq!(mem.len(), 1);
        assert_eq!(logger.failure_count(), 1);
    }

    #[test]
    fn missing_site_uses_sentinel_tag() {
        let mem = MemorySink::new(Format::Console);
        let logger = Logger::builder().left_justify(false).sink(mem.clone()).build();
        logger.log(Level::Info, None, format_args!("orphan"));
        assert_eq!(mem.text(), "unknown:0   orphan");
    }

    #[test]
    fn track_caller_methods_tag_with_this_file() {
        let mem = MemorySink::new(Format::Console);
        let logger = Logger::builder().left_justify(false).sink(mem.clone()).build();
        logger.info("hello");
        let text = mem.text();
        assert!(text.starts_with("ln_core::logger:"), "{text}");
        assert!(text.ends_with(" hello"));
    }

    #[test]
    fn error_cause_renders_chain() {
        let mem = MemorySink::new(Format::Console);
        let logger = Logger::builder().sink(mem.clone()).build();
        let err = anyhow::anyhow!("socket closed").context("sync failed");
        logger.error_cause(err.as_ref());
        let (level, text) = mem.lines().remove(0);
        assert_eq!(level, Level::Error);
        // A backtrace may follow when RUST_BACKTRACE is set.
        assert!(text.contains("sync failed\nCaused by: socket closed"), "{text}");
    }

    #[test]
    fn foreign_records_are_tagged_by_target() {
        let mem = MemorySink::new(Format::Console);
        let logger = Logger::builder().left_justify(false).sink(mem.clone()).build();
        logger.log_foreign(Level::Info, "hyper::client", format_args!("connected"));
        assert_eq!(mem.text(), "hyper::client     connected");
    }

    struct Chatty<'a>(&'a Logger);

    impl fmt::Display for Chatty<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            self.0.debug("rendering chatty value");
            f.write_str("chatty")
        }
    }

    #[test]
    fn display_that_logs_does_not_deadlock() {
        let mem = MemorySink::new(Format::Console);
        let logger = Logger::builder().left_justify(false).sink(mem.clone()).build();
        logger.info(Chatty(&logger));
        logger.log_foreign(Level::Info, "dep", format_args!("{}", Chatty(&logger)));

        let lines: Vec<String> = mem.lines().into_iter().map(|(_, t)| t).collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].ends_with(" rendering chatty value"));
        assert!(lines[1].ends_with(" chatty"));
        assert!(lines[2].ends_with(" rendering chatty value"));
        assert_eq!(lines[3], "dep     chatty");
    }

    #[test]
    fn error_anyhow_keeps_context_chain() {
        let mem = MemorySink::new(Format::Console);
        let logger = Logger::builder().sink(mem.clone()).build();
        let err = anyhow::anyhow!("socket closed").context("sync failed");
        logger.error_anyhow(&err);
        let (level, text) = mem.lines().remove(0);
        assert_eq!(level, Level::Error);
        assert!(text.contains("sync failed"), "{text}");
        assert!(text.contains("Caused by:"), "{text}");
        assert!(text.contains("socket closed"), "{text}");
    }

    #[test]
    fn no_sinks_means_nothing_is_enabled() {
        let logger = Logger::builder().build();
        assert!(!logger.is_enabled(Level::Error));
    }

    #[test]
    fn unopenable_file_sink_is_disabled_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "").unwrap();
        let config = LoggerConfig {
            enable_console_sink: false,
            enable_file_sink: true,
            file_path_template: blocker.join("ln.%g.log").to_string_lossy().into_owned(),
            ..Default::default()
        };
        let logger = Logger::from_config(&config);
        assert_eq!(logger.failure_count(), 1);
        assert!(!logger.is_enabled(Level::Error));
        logger.error("goes nowhere");
    }
}
