//! # Logging Setup
//!
//! Builds the tracing dispatcher the register runs under. Events go to a
//! dated file in the configured log directory, one file per day:
//!
//! ```text
//! logs/
//! ├── kassa-2025-05-14.log
//! ├── kassa-2025-05-15.log
//! └── revenue.log            (written by TotalRevenueFileOutput)
//! ```
//!
//! `RUST_LOG` wins over `log_filter` from the configuration.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{Local, NaiveDate};
use kassa_service::CheckoutConfig;
use tracing::Dispatch;
use tracing_subscriber::EnvFilter;

use crate::error::StartupError;

/// File name of the log for `date`.
pub fn log_file_name(date: NaiveDate) -> String {
    format!("kassa-{}.log", date.format("%Y-%m-%d"))
}

/// Creates the log directory, opens today's file and returns a dispatcher
/// writing to it.
pub fn build_log_dispatch(config: &CheckoutConfig) -> Result<Dispatch, StartupError> {
    let path = open_log_path(&config.log_dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|source| StartupError::LogFile { path: path.clone(), source })?;

    let filter = env_filter(&config.log_filter)?;

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .finish();

    Ok(Dispatch::new(subscriber))
}

fn open_log_path(log_dir: &Path) -> Result<PathBuf, StartupError> {
    fs::create_dir_all(log_dir).map_err(|source| StartupError::LogDirectory {
        path: log_dir.to_path_buf(),
        source,
    })?;
    Ok(log_dir.join(log_file_name(Local::now().date_naive())))
}

fn env_filter(configured: &str) -> Result<EnvFilter, StartupError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(configured).map_err(|e| StartupError::LogFilter {
        filter: configured.to_string(),
        reason: e.to_string(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
