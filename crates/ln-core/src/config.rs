//! Logger configuration.
//!
//! The configuration is read once at process start and never changes
//! afterwards. Every field has a default, so an empty JSON object is a valid
//! config.
//!
//! # Example config
//!
//! ```json
//! {
//!   "min_level": "info",
//!   "enable_console_sink": true,
//!   "enable_file_sink": true,
//!   "file_path_template": "/var/log/app/ln.%g.log",
//!   "max_file_bytes": 1000000,
//!   "max_file_count": 3,
//!   "left_justify_tags": true,
//!   "console_tag": "app",
//!   "console": "stderr"
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::console::ConsoleKind;
use crate::error::LnError;
use crate::level::Level;

/// Default size of one ring file (1 MB).
pub const DEFAULT_MAX_FILE_BYTES: u64 = 1_000_000;

/// Default number of ring files.
pub const DEFAULT_MAX_FILE_COUNT: u32 = 3;

/// Process-wide logger settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Records below this level are dropped before any tag or formatting work.
    pub min_level: Level,

    /// Forward lines to the host console.
    pub enable_console_sink: bool,

    /// Write lines to the rotating file ring.
    pub enable_file_sink: bool,

    /// Ring file path; `%g` is replaced by the ring index.
    pub file_path_template: String,

    /// Size threshold of one ring file in bytes.
    pub max_file_bytes: u64,

    /// Number of files in the ring.
    pub max_file_count: u32,

    /// Right-align tags to the widest tag seen so far.
    pub left_justify_tags: bool,

    /// Tag the console primitive files every line under.
    pub console_tag: String,

    /// Console primitive to drive.
    pub console: ConsoleKind,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: Level::Debug,
            enable_console_sink: true,
            enable_file_sink: false,
            file_path_template: default_file_path_template(),
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            max_file_count: DEFAULT_MAX_FILE_COUNT,
            left_justify_tags: true,
            console_tag: "ln".to_string(),
            console: ConsoleKind::Tracing,
        }
    }
}

impl LoggerConfig {
    /// Check the limits a rotating file sink depends on.
    pub fn validate(&self) -> Result<(), LnError> {
        if self.enable_file_sink {
            if self.max_file_bytes == 0 {
                return Err(LnError::Config("max_file_bytes must be greater than 0".into()));
            }
            if self.max_file_count == 0 {
                return Err(LnError::Config("max_file_count must be at least 1".into()));
            }
            if self.file_path_template.trim().is_empty() {
                return Err(LnError::Config("file_path_template is empty".into()));
            }
        }
        Ok(())
    }

    /// Point the file ring into `dir`, keeping the default file name.
    pub fn with_log_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.file_path_template = dir.as_ref().join("ln.%g.log").to_string_lossy().into_owned();
        self
    }
}

fn default_file_path_template() -> String {
    std::env::temp_dir().join("ln.%g.log").to_string_lossy().into_owned()
}

/// Load and parse a JSON config file.
pub fn load_config(path: &Path) -> anyhow::Result<LoggerConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: LoggerConfig = serde_json::from_str(&content)?;
    config.validate()?;
    Ok(config)
}
