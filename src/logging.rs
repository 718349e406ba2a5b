//! Process-level log sink for the binary.
//!
//! The library itself only emits `tracing` events through
//! [`crate::ingestion::TracingObserver`]; this module installs the subscriber that sends
//! them to a rolling file.

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the log directory.
pub const LOG_DIR_ENV: &str = "RECENT_CUSTOMERS_LOG_DIR";

const DEFAULT_LOG_DIR: &str = "logs";
const LOG_FILE_PREFIX: &str = "recent_customers";
const LOG_FILE_SUFFIX: &str = "log";

/// Log directory from [`LOG_DIR_ENV`], falling back to `logs/`.
pub fn log_dir_from_env() -> PathBuf {
    std::env::var_os(LOG_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR))
}

/// Install a global fmt subscriber writing to a daily-rotated file under `dir`.
///
/// The filter comes from `RUST_LOG` (default `info`). Keep the returned guard alive for the
/// whole run; dropping it flushes buffered lines.
pub fn init(dir: &Path) -> std::io::Result<WorkerGuard> {
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix(LOG_FILE_SUFFIX)
        .build(dir)
        .map_err(std::io::Error::other)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init()
        .map_err(std::io::Error::other)?;

    Ok(guard)
}
