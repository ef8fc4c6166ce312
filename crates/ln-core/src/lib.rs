//! # ln-core
//!
//! Leveled logging facility routing call-site-tagged lines to a console
//! sink and a size/count rotated file sink, providing:
//!
//! - **Levels** (`level`) — `Debug < Info < Warn < Error`
//! - **Configuration** (`config`) — JSON config deserialization
//! - **Error types** (`error`) — sink failures and config errors via thiserror
//! - **Tags** (`tag`) — compile-time call sites, column-aligned tags
//! - **Time utilities** (`time_util`) — elapsed buckets and date-time stamps
//! - **Formatters** (`format`) — file and console line layouts
//! - **Sinks** (`sink`, `console`, `file`, `memory`) — output targets
//! - **Logger core** (`logger`) — level filtering and fan-out under one lock
//! - **Process-wide handle** (`global`) — `init`/`shutdown` and the macros
//! - **`log` bridge** (`bridge`) — routes the `log` crate into the sinks
//! - **Host console** (`platform`) — tracing-subscriber setup

pub mod bridge;
pub mod chain;
pub mod config;
pub mod console;
pub mod error;
pub mod file;
pub mod format;
pub mod global;
pub mod level;
pub mod logger;
pub mod memory;
pub mod platform;
pub mod record;
pub mod sink;
pub mod tag;
pub mod time_util;

pub use config::{LoggerConfig, load_config};
pub use error::LnError;
pub use global::{init, init_with, is_initialized, logger, shutdown};
pub use level::Level;
pub use logger::{Logger, LoggerBuilder};
pub use tag::CallSite;
