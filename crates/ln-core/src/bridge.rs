//! Bridge from the `log` crate.
//!
//! Libraries that log through `log::info!` and friends reach the same sinks
//! as direct calls. Their records carry no call-site tag of ours, so the
//! formatters tag them with the `log` target instead.

use log::{LevelFilter, Log, Metadata, Record};

use crate::global;
use crate::level::Level;
use crate::logger::Logger;

/// `log::Log` implementation forwarding into a [`Logger`].
pub struct LogBridge {
    logger: Option<&'static Logger>,
}

static GLOBAL_BRIDGE: LogBridge = LogBridge { logger: None };

impl LogBridge {
    /// Bridge into a specific logger instead of the process-wide one.
    pub const fn new(logger: &'static Logger) -> Self {
        Self { logger: Some(logger) }
    }

    fn target(&self) -> &'static Logger {
        self.logger.unwrap_or_else(global::logger)
    }
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.target().is_enabled(Level::from(metadata.level()))
    }

    fn log(&self, record: &Record) {
        let logger = self.target();
        let level = Level::from(record.level());
        if logger.is_enabled(level) {
            logger.log_foreign(level, record.target(), *record.args());
        }
    }

    fn flush(&self) {
        self.target().flush();
    }
}

/// Matching `log` max level for a minimum level of ours.
pub fn level_filter(min_level: Level) -> LevelFilter {
    match min_level {
        // `Trace` folds into `Debug`, so let it through too.
        Level::Debug => LevelFilter::Trace,
        Level::Info => LevelFilter::Info,
        Level::Warn => LevelFilter::Warn,
        Level::Error => LevelFilter::Error,
    }
}

/// Route the `log` crate into the process-wide logger.
///
/// Fails if another `log` backend is already registered.
pub fn install_log_bridge() -> Result<(), log::SetLoggerError> {
    log::set_logger(&GLOBAL_BRIDGE)?;
    log::set_max_level(level_filter(global::logger().min_level()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::Format;
    use crate::memory::MemorySink;

    fn leaked(min: Level, sink: MemorySink) -> &'static Logger {
        Box::leak(Box::new(Logger::builder().min_level(min).left_justify(false).sink(sink).build()))
    }

    #[test]
    fn forwards_with_target_tag() {
        let mem = MemorySink::new(Format::Console);
        let bridge = LogBridge::new(leaked(Level::Debug, mem.clone()));
        bridge.log(
            &Record::builder()
                .level(log::Level::Trace)
                .target("tokio::net")
                .args(format_args!("socket ready"))
                .build(),
        );
        assert_eq!(mem.lines(), vec![(Level::Debug, "tokio::net     socket ready".to_string())]);
    }

    #[test]
    fn respects_min_level() {
        let mem = MemorySink::new(Format::Console);
        let bridge = LogBridge::new(leaked(Level::Warn, mem.clone()));
        let meta = Metadata::builder().level(log::Level::Info).target("x").build();
        assert!(!bridge.enabled(&meta));
        bridge.log(&Record::builder().level(log::Level::Info).args(format_args!("quiet")).build());
        assert!(mem.is_empty());
    }

    #[test]
    fn level_filters() {
        assert_eq!(level_filter(Level::Debug), LevelFilter::Trace);
        assert_eq!(level_filter(Level::Error), LevelFilter::Error);
    }
}
