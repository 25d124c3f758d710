//! # Service Error Types
//!
//! What callers of [`SaleService`](crate::SaleService) see when something
//! goes wrong.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Kassa POS                              │
//! │                                                                         │
//! │  Collaborator / Aggregate           SaleService            View         │
//! │  ────────────────────────           ───────────            ────         │
//! │                                                                         │
//! │  (no active sale) ─────────────┐                                        │
//! │  ExecutionOrderError ──────────┼──► OperationFailed ──────► "Ending of  │
//! │  ServiceUnavailableError ──────┤    { message, cause }      sale        │
//! │  (short tender) ───────────────┘                            couldn't be │
//! │                                                             performed." │
//! │                                                                         │
//! │  ItemNotFoundError ─────────────────► ItemNotFound ───────► re-enter id │
//! │  ValidationError ───────────────────► Validation ─────────► re-enter    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only a wrapped `ServiceUnavailable` is worth retrying. Nothing in the
//! service retries on its own.

use std::io;
use std::path::PathBuf;

use kassa_core::{Amount, ExecutionOrderError, ItemId, ValidationError};
use thiserror::Error;

// =============================================================================
// Collaborator Errors
// =============================================================================

/// The inventory has no item with this id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Item {item_id} not found in inventory")]
pub struct ItemNotFoundError {
    pub item_id: ItemId,
}

/// A collaborator could not be reached.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{service} is unavailable: {reason}")]
pub struct ServiceUnavailableError {
    pub service: String,
    pub reason: String,
}

impl ServiceUnavailableError {
    pub fn new(service: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Service Operations
// =============================================================================

/// The public operations of the sale service, for error messages and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceOperation {
    StartSale,
    EndSale,
    CancelSale,
    AddItem,
    ApplyDiscount,
    Payment,
}

impl ServiceOperation {
    /// Name used in "... couldn't be performed." messages.
    pub const fn label(&self) -> &'static str {
        match self {
            ServiceOperation::StartSale => "Starting of sale",
            ServiceOperation::EndSale => "Ending of sale",
            ServiceOperation::CancelSale => "Sale cancellation",
            ServiceOperation::AddItem => "Addition of item",
            ServiceOperation::ApplyDiscount => "Application of discount",
            ServiceOperation::Payment => "Payment",
        }
    }
}

// =============================================================================
// Failure Cause
// =============================================================================

/// Why an operation failed, kept as data under `OperationFailed`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureCause {
    /// No sale has been started, or the last one is already finished.
    #[error("The attempted operation can't be performed when there isn't an active sale in progress.")]
    NoActiveSale,

    /// `start_sale` while another sale is still open.
    #[error("A sale is already in progress.")]
    SaleAlreadyActive,

    /// The sale is in the wrong lifecycle state.
    #[error(transparent)]
    ExecutionOrder(#[from] ExecutionOrderError),

    /// A collaborator is down.
    #[error(transparent)]
    ServiceUnavailable(#[from] ServiceUnavailableError),

    /// The cash handed over is less than the total.
    #[error("Paid amount {paid} does not cover the total {total}")]
    InsufficientPayment { total: Amount, paid: Amount },
}

// =============================================================================
// Sale Service Error
// =============================================================================

/// Errors returned by [`SaleService`](crate::SaleService).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaleServiceError {
    /// The operation could not be carried out; `cause` says why.
    ///
    /// ## When This Occurs
    /// - No active sale
    /// - The sale is in the wrong state (ending twice, paying before ending)
    /// - The discount service is unavailable
    /// - The tendered cash does not cover the total
    #[error("{message}")]
    OperationFailed {
        message: String,
        #[source]
        cause: FailureCause,
    },

    /// Unknown item id. The cashier should re-enter it.
    #[error(transparent)]
    ItemNotFound(#[from] ItemNotFoundError),

    /// Input rejected before the sale was touched.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl SaleServiceError {
    /// Wraps `cause` with the message for `operation`.
    pub fn operation_failed(operation: ServiceOperation, cause: impl Into<FailureCause>) -> Self {
        let cause = cause.into();
        let message = match (&operation, &cause) {
            (ServiceOperation::ApplyDiscount, FailureCause::ServiceUnavailable(_)) => {
                "Could not apply discount at this time. Try again later.".to_string()
            }
            _ => format!("{} couldn't be performed.", operation.label()),
        };

        SaleServiceError::OperationFailed { message, cause }
    }

    /// The underlying cause, if this is an `OperationFailed`.
    pub fn cause(&self) -> Option<&FailureCause> {
        match self {
            SaleServiceError::OperationFailed { cause, .. } => Some(cause),
            _ => None,
        }
    }

    /// Returns true if trying again later may succeed.
    ///
    /// ## Retryable Errors
    /// - A collaborator was unavailable
    ///
    /// ## Non-Retryable Errors
    /// - Everything else: wrong state, unknown item, bad input
    pub fn is_retryable(&self) -> bool {
        matches!(self.cause(), Some(FailureCause::ServiceUnavailable(_)))
    }
}

/// Convenience type alias for Results with SaleServiceError.
pub type SaleServiceResult<T> = Result<T, SaleServiceError>;

// =============================================================================
// Configuration Error
// =============================================================================

/// Failures loading [`CheckoutConfig`](crate::CheckoutConfig). Fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The config file is not valid TOML for this configuration.
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A value (from the file or the environment) is unusable.
    #[error("Invalid configuration value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

// =============================================================================
// Unit Tests
// =============================================================================
