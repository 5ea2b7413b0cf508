// src/logging.rs
// =============================================================================
// Logging setup: human-readable output on stderr plus a plain-text log file.
//
// The level defaults to info for this crate (debug with --verbose) and warn
// for everything else; RUST_LOG overrides both.
//
// The log file rotates at midnight (UTC) and the newest LOG_FILES_KEPT files
// are kept:
//
//   log/mini-spider.2026-10-19.log
//   log/mini-spider.2026-10-18.log
//   ...
// =============================================================================

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_FILE_PREFIX: &str = "mini-spider";
pub const LOG_FILE_SUFFIX: &str = "log";
/// Today's file plus four days of history
pub const LOG_FILES_KEPT: usize = 5;

/// Installs the global subscriber. Call once, before anything logs.
pub fn init_logging(verbose: bool, log_dir: &Path) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(format!("warn,mini_spider={}", level))?,
    };

    let stderr_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_writer(log_file_appender(log_dir)?);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install the log subscriber")?;

    Ok(())
}

/// Daily-rotated log file in `log_dir`, which is created if missing.
pub fn log_file_appender(log_dir: &Path) -> Result<RollingFileAppender> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix(LOG_FILE_SUFFIX)
        .max_log_files(LOG_FILES_KEPT)
        .build(log_dir)
        .with_context(|| format!("Failed to open log file in {}", log_dir.display()))
}
