//! Process-wide logger, macros and the `log` bridge, end to end.

use ln_core::format::Format;
use ln_core::memory::MemorySink;
use ln_core::{Level, LnError, Logger, LoggerConfig};

#[test]
fn macros_and_bridge_reach_the_installed_logger() {
    let mem = MemorySink::new(Format::Console);
    let logger = Logger::builder().min_level(Level::Info).left_justify(false).sink(mem.clone()).build();
    ln_core::init_with(logger).unwrap();
    assert!(ln_core::is_initialized());
    assert!(matches!(ln_core::init(&LoggerConfig::default()), Err(LnError::AlreadyInitialized)));

    ln_core::debug!("filtered {}", 1);
    let info_line = line!() + 1;
    ln_core::info!("ready on {}", 8080);
    ln_core::global::warn("façade call");
    let err = std::io::Error::new(std::io::ErrorKind::TimedOut, "peer silent");
    ln_core::error_cause!(&err);

    ln_core::bridge::install_log_bridge().unwrap();
    log::info!(target: "dep::pool", "pool warmed");
    log::debug!("below min level");

    ln_core::shutdown();

    let lines = mem.lines();
    assert_eq!(lines.len(), 4, "{lines:?}");

    assert_eq!(lines[0], (Level::Info, format!("global:{info_line:<3} ready on 8080")));
    assert_eq!(lines[1].0, Level::Warn);
    // `#[track_caller]` and macro call sites share one tag style.
    assert!(lines[1].1.starts_with("global:"), "{}", lines[1].1);
    assert!(lines[1].1.ends_with(" façade call"));
    assert_eq!(lines[2].0, Level::Error);
    assert!(lines[2].1.starts_with("global:"));
    // A backtrace follows the message when RUST_BACKTRACE enables capture.
    assert!(lines[2].1.contains(" peer silent"), "{}", lines[2].1);
    assert_eq!(lines[3], (Level::Info, "dep::pool     pool warmed".to_string()));
}
