//! # Checkout Configuration
//!
//! Settings the register reads once at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                            │
//! │     KASSA_STORE_NAME, KASSA_CURRENCY, KASSA_LOG_DIR,                    │
//! │     KASSA_LOG_FILTER, KASSA_OPENING_BALANCE                             │
//! │                                                                         │
//! │  2. TOML Config File                                                    │
//! │     $KASSA_CONFIG, or                                                   │
//! │     ~/.config/kassa/kassa.toml (Linux)                                  │
//! │     ~/Library/Application Support/se.kassa.kassa/kassa.toml (macOS)     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # kassa.toml
//! store_name = "Corner Shop"
//! currency = "SEK"
//! log_dir = "logs"
//! revenue_log = "revenue.log"
//! log_filter = "info,kassa_service=debug"
//! opening_balance = "1000.00"
//! ```
//!
//! A missing file is fine. A file that exists but does not parse is an error.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use kassa_core::Amount;

use crate::error::ConfigError;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "KASSA_CONFIG";

/// Register configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutConfig {
    /// Store name shown by the view.
    pub store_name: String,

    /// Currency suffix on receipts and in the view.
    pub currency: String,

    /// Directory for the diagnostic log and the revenue log.
    pub log_dir: PathBuf,

    /// File name of the revenue log inside `log_dir`.
    pub revenue_log: String,

    /// Default `tracing` filter, overridden by `RUST_LOG`.
    pub log_filter: String,

    /// Cash in the drawer when the register opens.
    pub opening_balance: Amount,
}

impl Default for CheckoutConfig {
    /// Returns defaults suitable for the demo register.
    ///
    /// ## Default Values
    /// - Store: "Kassa Demo Store"
    /// - Currency: SEK
    /// - Logs: `./logs`, revenue in `revenue.log`
    /// - Filter: `info`
    /// - Opening balance: 1000.00
    fn default() -> Self {
        CheckoutConfig {
            store_name: "Kassa Demo Store".to_string(),
            currency: "SEK".to_string(),
            log_dir: PathBuf::from("logs"),
            revenue_log: "revenue.log".to_string(),
            log_filter: "info".to_string(),
            opening_balance: Amount::from_units(1000),
        }
    }
}

impl CheckoutConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, else `$KASSA_CONFIG`, else the platform config dir)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let path = config_path
            .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from))
            .or_else(Self::default_config_path);

        let mut config = match path {
            Some(path) if path.exists() => Self::from_file(&path)?,
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        Ok(config)
    }

    /// Reads and parses one TOML file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        info!(?path, "Loading config from file");

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies `KASSA_*` overrides looked up through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("KASSA_STORE_NAME") {
            self.store_name = name;
        }

        if let Some(currency) = lookup("KASSA_CURRENCY") {
            self.currency = currency;
        }

        if let Some(dir) = lookup("KASSA_LOG_DIR") {
            debug!(log_dir = %dir, "Overriding log directory from environment");
            self.log_dir = PathBuf::from(dir);
        }

        if let Some(filter) = lookup("KASSA_LOG_FILTER") {
            self.log_filter = filter;
        }

        if let Some(balance) = lookup("KASSA_OPENING_BALANCE") {
            self.opening_balance =
                balance
                    .parse()
                    .map_err(|e: kassa_core::ValidationError| ConfigError::InvalidValue {
                        key: "KASSA_OPENING_BALANCE".to_string(),
                        reason: e.to_string(),
                    })?;
        }

        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.currency.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "currency".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        if self.revenue_log.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "revenue_log".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        if self.opening_balance.is_negative() {
            return Err(ConfigError::InvalidValue {
                key: "opening_balance".to_string(),
                reason: format!("must not be negative, got {}", self.opening_balance),
            });
        }

        Ok(())
    }

    /// Full path of the revenue log.
    pub fn revenue_log_path(&self) -> PathBuf {
        self.log_dir.join(&self.revenue_log)
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("se", "kassa", "kassa")
            .map(|dirs| dirs.config_dir().join("kassa.toml"))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
