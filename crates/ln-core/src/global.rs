//! Process-wide logger and the call-site façade.
//!
//! The logger is installed once with [`init`] (or built from
//! [`LoggerConfig::default`] on first use) and lives until the process exits.
//! Call [`shutdown`] before exit to flush buffered file output.
//!
//! ```no_run
//! use ln_core::{LoggerConfig, Level};
//!
//! let config = LoggerConfig { min_level: Level::Info, ..Default::default() };
//! ln_core::init(&config).expect("logger installed once");
//!
//! ln_core::info!("listening on port {}", 8080);
//! ln_core::debug!("filtered out before formatting");
//! ln_core::shutdown();
//! ```

use std::error::Error;
use std::fmt;
use std::sync::OnceLock;

use crate::config::LoggerConfig;
use crate::error::LnError;
use crate::logger::Logger;

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Install the process-wide logger built from `config`.
///
/// Fails with [`LnError::AlreadyInitialized`] once any logger is installed,
/// including the default one created by an earlier log call.
pub fn init(config: &LoggerConfig) -> Result<(), LnError> {
    config.validate()?;
    init_with(Logger::from_config(config))
}

/// Install an explicitly assembled logger.
pub fn init_with(logger: Logger) -> Result<(), LnError> {
    LOGGER.set(logger).map_err(|_| LnError::AlreadyInitialized)
}

/// The process-wide logger.
pub fn logger() -> &'static Logger {
    LOGGER.get_or_init(|| Logger::from_config(&LoggerConfig::default()))
}

pub fn is_initialized() -> bool {
    LOGGER.get().is_some()
}

/// Flush every sink of the process-wide logger.
pub fn shutdown() {
    if let Some(logger) = LOGGER.get() {
        logger.flush();
    }
}

#[track_caller]
pub fn debug(msg: impl fmt::Display) {
    logger().debug(msg);
}

#[track_caller]
pub fn info(msg: impl fmt::Display) {
    logger().info(msg);
}

#[track_caller]
pub fn warn(msg: impl fmt::Display) {
    logger().warn(msg);
}

#[track_caller]
pub fn error(msg: impl fmt::Display) {
    logger().error(msg);
}

#[track_caller]
pub fn error_cause(err: &(dyn Error + 'static)) {
    logger().error_cause(err);
}

#[track_caller]
pub fn error_anyhow(err: &anyhow::Error) {
    logger().error_anyhow(err);
}

// ---------------------------------------------------------------------------
// Macros
// ---------------------------------------------------------------------------

/// Log at an explicit level. The tag is derived from `file!()` and `line!()`
/// of the invocation, the same way `#[track_caller]` methods derive theirs;
/// arguments are only formatted when the level is enabled.
#[macro_export]
macro_rules! log_at {
    ($level:expr, $($arg:tt)+) => {{
        let logger = $crate::global::logger();
        let level = $level;
        if logger.is_enabled(level) {
            let site = $crate::CallSite::new(::core::file!(), ::core::line!());
            logger.log(level, ::core::option::Option::Some(&site), ::core::format_args!($($arg)+));
        }
    }};
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => { $crate::log_at!($crate::Level::Debug, $($arg)+) };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => { $crate::log_at!($crate::Level::Info, $($arg)+) };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => { $crate::log_at!($crate::Level::Warn, $($arg)+) };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => { $crate::log_at!($crate::Level::Error, $($arg)+) };
}

/// Log an error reference and its source chain at `Error`, plus a backtrace
/// of the invocation when `RUST_BACKTRACE` enables capture.
///
/// Takes anything coercible to `&(dyn Error + 'static)`, e.g. `&io_err` or
/// `anyhow_err.as_ref()`.
#[macro_export]
macro_rules! error_cause {
    ($err:expr) => {{
        let logger = $crate::global::logger();
        if logger.is_enabled($crate::Level::Error) {
            let site = $crate::CallSite::new(::core::file!(), ::core::line!());
            let text = $crate::chain::with_backtrace(
                $crate::chain::format_error_chain($err),
                &::std::backtrace::Backtrace::capture(),
            );
            logger.log($crate::Level::Error, ::core::option::Option::Some(&site), ::core::format_args!("{}", text));
        }
    }};
}
