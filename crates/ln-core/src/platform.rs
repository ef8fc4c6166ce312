//! Host console setup using the `tracing` ecosystem.
//!
//! [`crate::console::TracingConsole`] and the facility's own failure reports
//! emit `tracing` events; this installs the subscriber that prints them:
//! - Console output (colored, human-readable, timestamped)
//! - Configurable level via env var `RUST_LOG` or explicit parameter

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt};

/// Install the global tracing subscriber.
///
/// Should be called once at program start, before [`crate::init`].
///
/// The subscriber is installed with `set_global_default` rather than
/// `init()`: the latter would also claim the `log` crate's global logger,
/// which [`crate::bridge::install_log_bridge`] needs.
///
/// # Parameters
///
/// - `log_level`: default filter if `RUST_LOG` env var is not set (e.g. `"info"`)
pub fn init_platform_logging(log_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_ansi(true);

    let subscriber = tracing_subscriber::registry().with(env_filter).with(console_layer);
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
