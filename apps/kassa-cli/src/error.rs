//! # Startup Errors
//!
//! Failures that stop the register before (or while) the console session
//! runs. Operation failures inside a sale are not here; the view reports
//! those to the cashier and carries on.

use std::io;
use std::path::PathBuf;

use kassa_core::ValidationError;
use kassa_service::ConfigError;
use thiserror::Error;

/// Everything that can abort [`run`](crate::run).
#[derive(Debug, Error)]
pub enum StartupError {
    /// The configuration file or an override was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The log directory could not be created.
    #[error("Failed to create log directory {}: {source}", path.display())]
    LogDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The dated log file could not be opened.
    #[error("Failed to open log file {}: {source}", path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// `RUST_LOG` was unset and the configured filter does not parse.
    #[error("Invalid log filter '{filter}': {reason}")]
    LogFilter { filter: String, reason: String },

    /// The revenue log could not be opened.
    ///
    /// ## When This Occurs
    /// - The directory is read-only
    /// - The path points at a directory
    #[error("Failed to open revenue log {}: {source}", path.display())]
    RevenueLog {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The built-in catalog has an invalid entry.
    #[error("Invalid catalog entry: {0}")]
    Catalog(#[from] ValidationError),

    /// Writing to the console failed.
    #[error("Console output failed: {0}")]
    Console(#[from] io::Error),
}

// =============================================================================
// Unit Tests
// =============================================================================
