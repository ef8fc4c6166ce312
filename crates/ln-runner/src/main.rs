//! # ln-runner
//!
//! Driver for the `ln` logging facility.
//!
//! Loads a JSON logger configuration, installs the process-wide logger and
//! the `log` bridge, then emits lines from several threads so the console
//! alignment and the file ring can be inspected.
//!
//! # Usage
//!
//! ```bash
//! ln-runner ln.json --threads 4 --count 1000 --log-dir /tmp/ln
//! ```

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use ln_core::{Level, LoggerConfig};
use tracing::info;

/// Leveled logging facility driver.
#[derive(Parser)]
#[command(name = "ln-runner", about = "Leveled logging facility driver")]
struct Cli {
    /// Logger configuration file (JSON). Defaults apply when omitted.
    config: Option<PathBuf>,

    /// Host console filter (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "debug")]
    log_level: String,

    /// Override the minimum level of the logger.
    #[arg(long)]
    min_level: Option<Level>,

    /// Enable the file ring in this directory.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Number of logging threads.
    #[arg(short, long, default_value_t = 4)]
    threads: usize,

    /// Lines per thread.
    #[arg(short, long, default_value_t = 25)]
    count: usize,

    /// Pause between lines of one thread, in milliseconds.
    #[arg(long, default_value_t = 0)]
    pause_ms: u64,
}

mod worker {
    use std::time::Duration;

    pub fn run(id: usize, count: usize, pause: Duration) {
        ln_core::debug!("worker {id} starting");
        for n in 0..count {
            if n % 10 == 9 {
                ln_core::warn!("worker {id} reached line {n}");
            } else {
                ln_core::info!("worker {id} line {n}");
            }
            if !pause.is_zero() {
                std::thread::sleep(pause);
            }
        }
        ln_core::debug!("worker {id} done");
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Host console
    ln_core::platform::init_platform_logging(&cli.log_level)?;

    // 2. Logger configuration
    let mut config = match &cli.config {
        Some(path) => ln_core::load_config(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => LoggerConfig::default(),
    };
    if let Some(level) = cli.min_level {
        config.min_level = level;
    }
    if let Some(dir) = &cli.log_dir {
        config = config.with_log_dir(dir);
        config.enable_file_sink = true;
    }

    // 3. Process-wide logger + `log` bridge
    ln_core::init(&config)?;
    ln_core::bridge::install_log_bridge()?;
    info!(
        min_level = %config.min_level,
        file = config.enable_file_sink,
        console = config.enable_console_sink,
        "ln-runner starting"
    );

    // 4. Workers
    let pause = Duration::from_millis(cli.pause_ms);
    std::thread::scope(|s| {
        for id in 0..cli.threads {
            s.spawn(move || worker::run(id, cli.count, pause));
        }
    });

    log::info!(target: "ln_runner::bridge", "line issued through the log crate");
    if let Err(err) = std::fs::read_to_string("/nonexistent/ln-runner.cfg").context("reading optional overrides") {
        ln_core::global::error_anyhow(&err);
    }

    // 5. Flush the file ring before exit
    let failures = ln_core::logger().failure_count();
    ln_core::shutdown();
    info!(failures, "ln-runner finished");
    Ok(())
}
