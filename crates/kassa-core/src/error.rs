//! # Error Types
//!
//! Domain-specific error types for kassa-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  kassa-core errors (this file)                                          │
//! │  ├── ExecutionOrderError - Lifecycle operation from the wrong state     │
//! │  ├── CoreError           - Aggregate failures (order, unknown line)     │
//! │  └── ValidationError     - Input validation failures                    │
//! │                                                                         │
//! │  kassa-service errors (separate crate)                                  │
//! │  └── SaleServiceError    - What the register view sees                  │
//! │                                                                         │
//! │  Flow: ExecutionOrderError → CoreError → SaleServiceError → View        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item id, states, etc.)
//! 3. Errors are enum variants or structs, never String
//! 4. Lifecycle failures carry the states as data, so callers can branch on
//!    them without parsing messages

use thiserror::Error;

use crate::lifecycle::{SaleOperation, SaleStatus};
use crate::types::ItemId;

// =============================================================================
// Execution Order Error
// =============================================================================

/// A lifecycle operation was attempted while the sale was in a state that
/// does not allow it.
///
/// ## When This Occurs
/// - Adding an item after the sale was ended
/// - Ending a sale twice
/// - Recording a payment before the sale was ended
/// - Cancelling a sale that is already paid
///
/// These are always caller mistakes. Nothing retries them.
///
/// ## Example
/// ```rust
/// use kassa_core::{Sale, SaleOperation, SaleStatus};
///
/// let mut sale = Sale::start();
/// sale.end().unwrap();
///
/// let err = sale.end().unwrap_err();
/// assert_eq!(err.operation, SaleOperation::End);
/// assert_eq!(err.current, SaleStatus::AwaitingPayment);
/// assert_eq!(err.required, &[SaleStatus::Registering]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "cannot {operation} while the sale is {current} (requires {})",
    join_statuses(.required)
)]
pub struct ExecutionOrderError {
    /// What was attempted.
    pub operation: SaleOperation,
    /// Where the sale actually was.
    pub current: SaleStatus,
    /// Every state the operation would have been accepted from.
    pub required: &'static [SaleStatus],
}

fn join_statuses(statuses: &[SaleStatus]) -> String {
    statuses
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(" or ")
}

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Operation attempted from the wrong lifecycle state.
    #[error(transparent)]
    ExecutionOrder(#[from] ExecutionOrderError),

    /// The quantity of an item was increased, but the item is not in the sale.
    ///
    /// ## When This Occurs
    /// - `Sale::increase_quantity` called with an id that was never added
    #[error("Item {0} is not part of the sale")]
    ItemNotInSale(ItemId),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., an amount that is not a decimal number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
