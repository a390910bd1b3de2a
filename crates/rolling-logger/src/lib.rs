//! Rolling Logger
//!
//! A rolling file logger with a circular buffer of recent lines.
//!
//! `init_logger` installs a global `tracing` subscriber that writes
//! plain-text lines to `<log_dir>/<app_name>.log` (rotated by size) and to
//! stderr. Records emitted through the `log` facade are bridged into the
//! same subscriber.

mod buffer;
mod writer;

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use thiserror::Error;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub use buffer::LogBuffer;
pub use writer::{RollingConfig, RollingFileWriter};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("log file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("logger already initialized: {0}")]
    AlreadyInitialized(String),
    #[error("logger not initialized")]
    NotInitialized,
}

/// Handle to the installed logger
#[derive(Clone)]
pub struct LoggerHandle {
    log_file: PathBuf,
    buffer: Arc<LogBuffer>,
}

impl LoggerHandle {
    pub fn log_file(&self) -> &Path {
        &self.log_file
    }

    pub fn recent_lines(&self) -> Vec<String> {
        self.buffer.lines()
    }
}

static LOGGER: OnceLock<LoggerHandle> = OnceLock::new();

/// Initialize the global logger with default rotation limits.
pub fn init_logger(log_dir: impl AsRef<Path>, app_name: &str) -> Result<LoggerHandle, LoggerError> {
    init_logger_with(log_dir, app_name, RollingConfig::default())
}

pub fn init_logger_with(
    log_dir: impl AsRef<Path>,
    app_name: &str,
    config: RollingConfig,
) -> Result<LoggerHandle, LoggerError> {
    if LOGGER.get().is_some() {
        return Err(LoggerError::AlreadyInitialized(app_name.to_string()));
    }

    let log_file = log_dir.as_ref().join(format!("{}.log", app_name));
    let writer = RollingFileWriter::open(&log_file, config)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer.clone())
                .with_ansi(false)
                .with_target(true)
                .with_timer(ChronoLocal::new(TIMESTAMP_FORMAT.to_string())),
        )
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init()
        .map_err(|e| LoggerError::AlreadyInitialized(e.to_string()))?;

    let handle = LoggerHandle {
        log_file,
        buffer: writer.buffer(),
    };
    let _ = LOGGER.set(handle.clone());
    Ok(handle)
}

/// Handle of the installed logger, if any.
pub fn handle() -> Option<&'static LoggerHandle> {
    LOGGER.get()
}

/// Most recent lines written to the log file, oldest first.
pub fn recent_lines() -> Vec<String> {
    LOGGER.get().map(LoggerHandle::recent_lines).unwrap_or_default()
}

pub fn info(msg: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    log::info!(target: "rolling_logger", "{}", msg);
    Ok(())
}

pub fn warn(msg: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    log::warn!(target: "rolling_logger", "{}", msg);
    Ok(())
}

pub fn error(msg: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    log::error!(target: "rolling_logger", "{}", msg);
    Ok(())
}

fn ensure_initialized() -> Result<(), LoggerError> {
    LOGGER.get().map(|_| ()).ok_or(LoggerError::NotInitialized)
}
