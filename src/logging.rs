//! File-based logging using simplelog
//!
//! The terminal belongs to the TUI, so log records go to a file. The level
//! comes from `RUST_LOG` and defaults to `info`.

use anyhow::{Context, Result};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Default log location: `smooth_snake.log` in the system temp directory
pub fn default_log_path() -> PathBuf {
    std::env::temp_dir().join("smooth_snake.log")
}

/// Parse a `RUST_LOG`-style level name, falling back to `Info`
pub fn level_from_str(value: &str) -> LevelFilter {
    match value.trim().to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Initialize file-based logging at `path`
pub fn init(path: &Path) -> Result<()> {
    let level = std::env::var("RUST_LOG")
        .map(|v| level_from_str(&v))
        .unwrap_or(LevelFilter::Info);

    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    WriteLogger::init(level, config, file).context("Failed to initialize logger")?;

    log::debug!("Logging to {} at {:?}", path.display(), level);
    Ok(())
}
