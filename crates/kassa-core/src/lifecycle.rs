//! # Sale Lifecycle
//!
//! The sale state machine, kept in one place.
//!
//! ## State Diagram
//! ```text
//!  ┌─────────────┐  end()   ┌──────────────────┐  record_payment()  ┌──────┐
//!  │ REGISTERING │ ───────► │ AWAITING_PAYMENT │ ─────────────────► │ PAID │
//!  └──────┬──────┘          └────────┬─────────┘                    └──────┘
//!         │ cancel()                 │ cancel()
//!         ▼                          ▼
//!  ┌──────────────────────────────────────────┐
//!  │                CANCELLED                 │   PAID and CANCELLED
//!  └──────────────────────────────────────────┘   are terminal
//! ```
//!
//! Every operation on a sale goes through [`transition`]. The rules for each
//! operation (where it may start, where it lands) live in
//! [`SaleOperation::allowed_from`] and [`SaleOperation::moves_to`], and no
//! other code compares statuses.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ExecutionOrderError;

// =============================================================================
// Sale Status
// =============================================================================

/// Where a sale is in its lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SaleStatus {
    /// Items are being scanned.
    #[default]
    Registering,
    /// Item registration is closed; the total is final.
    AwaitingPayment,
    /// A payment has been recorded. Terminal.
    Paid,
    /// The sale was abandoned. Terminal.
    Cancelled,
}

impl SaleStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            SaleStatus::Registering => "REGISTERING",
            SaleStatus::AwaitingPayment => "AWAITING_PAYMENT",
            SaleStatus::Paid => "PAID",
            SaleStatus::Cancelled => "CANCELLED",
        }
    }

    /// States this one may move to.
    pub const fn allowed_targets(&self) -> &'static [SaleStatus] {
        match self {
            SaleStatus::Registering => &[SaleStatus::AwaitingPayment, SaleStatus::Cancelled],
            SaleStatus::AwaitingPayment => &[SaleStatus::Paid, SaleStatus::Cancelled],
            SaleStatus::Paid | SaleStatus::Cancelled => &[],
        }
    }

    /// No further transitions out of this state.
    pub const fn is_terminal(&self) -> bool {
        self.allowed_targets().is_empty()
    }
}

impl fmt::Display for SaleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Sale Operation
// =============================================================================

/// Everything that can be asked of a sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaleOperation {
    AddItem,
    IncreaseQuantity,
    End,
    Cancel,
    RecordPayment,
    ApplyDiscount,
    /// Guard used before discount and payment handling.
    EnsureAwaitingPayment,
}

impl SaleOperation {
    /// States this operation is accepted from.
    pub const fn allowed_from(&self) -> &'static [SaleStatus] {
        use SaleStatus::*;

        match self {
            SaleOperation::AddItem | SaleOperation::IncreaseQuantity | SaleOperation::End => {
                &[Registering]
            }
            SaleOperation::Cancel => &[Registering, AwaitingPayment],
            SaleOperation::RecordPayment
            | SaleOperation::ApplyDiscount
            | SaleOperation::EnsureAwaitingPayment => &[AwaitingPayment],
        }
    }

    /// Where the sale lands after the operation, or `None` if it stays put.
    pub const fn moves_to(&self) -> Option<SaleStatus> {
        match self {
            SaleOperation::End => Some(SaleStatus::AwaitingPayment),
            SaleOperation::Cancel => Some(SaleStatus::Cancelled),
            SaleOperation::RecordPayment => Some(SaleStatus::Paid),
            SaleOperation::AddItem
            | SaleOperation::IncreaseQuantity
            | SaleOperation::ApplyDiscount
            | SaleOperation::EnsureAwaitingPayment => None,
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            SaleOperation::AddItem => "add an item",
            SaleOperation::IncreaseQuantity => "increase an item quantity",
            SaleOperation::End => "end the sale",
            SaleOperation::Cancel => "cancel the sale",
            SaleOperation::RecordPayment => "record a payment",
            SaleOperation::ApplyDiscount => "apply a discount",
            SaleOperation::EnsureAwaitingPayment => "take payment",
        }
    }
}

impl fmt::Display for SaleOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

// =============================================================================
// Transition
// =============================================================================

/// Checks `operation` against `current` and returns the resulting status.
///
/// ## Example
/// ```rust
/// use kassa_core::lifecycle::{transition, SaleOperation, SaleStatus};
///
/// let next = transition(SaleStatus::Registering, SaleOperation::End).unwrap();
/// assert_eq!(next, SaleStatus::AwaitingPayment);
///
/// let err = transition(next, SaleOperation::AddItem).unwrap_err();
/// assert_eq!(err.current, SaleStatus::AwaitingPayment);
/// ```
pub fn transition(
    current: SaleStatus,
    operation: SaleOperation,
) -> Result<SaleStatus, ExecutionOrderError> {
    let required = operation.allowed_from();

    if !required.contains(&current) {
        return Err(ExecutionOrderError {
            operation,
            current,
            required,
        });
    }

    Ok(operation.moves_to().unwrap_or(current))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STATUSES: [SaleStatus; 4] = [
        SaleStatus::Registering,
        SaleStatus::AwaitingPayment,
        SaleStatus::Paid,
        SaleStatus::Cancelled,
    ];

    const ALL_OPERATIONS: [SaleOperation; 7] = [
        SaleOperation::AddItem,
        SaleOperation::IncreaseQuantity,
        SaleOperation::End,
        SaleOperation::Cancel,
        SaleOperation::RecordPayment,
        SaleOperation::ApplyDiscount,
        SaleOperation::EnsureAwaitingPayment,
    ];

    #[test]
    fn test_happy_path() {
        let status = SaleStatus::default();
        let status = transition(status, SaleOperation::AddItem).unwrap();
        assert_eq!(status, SaleStatus::Registering);

        let status = transition(status, SaleOperation::End).unwrap();
        assert_eq!(status, SaleStatus::AwaitingPayment);

        let status = transition(status, SaleOperation::RecordPayment).unwrap();
        assert_eq!(status, SaleStatus::Paid);
        assert!(status.is_terminal());
    }

    #[test]
    fn test_terminal_states_reject_everything() {
        for status in [SaleStatus::Paid, SaleStatus::Cancelled] {
            for op in ALL_OPERATIONS {
                let err = transition(status, op).unwrap_err();
                assert_eq!(err.current, status);
                assert_eq!(err.operation, op);
            }
        }
    }

    #[test]
    fn test_moves_stay_inside_the_state_graph() {
        for status in ALL_STATUSES {
            for op in ALL_OPERATIONS {
                if let Ok(next) = transition(status, op) {
                    assert!(
                        next == status || status.allowed_targets().contains(&next),
                        "{op:?} moved {status} to {next}, which is not an allowed target"
                    );
                }
            }
        }
    }

    #[test]
    fn test_error_carries_required_states() {
        let err = transition(SaleStatus::Registering, SaleOperation::RecordPayment).unwrap_err();
        assert_eq!(err.required, &[SaleStatus::AwaitingPayment]);

        let err = transition(SaleStatus::Paid, SaleOperation::Cancel).unwrap_err();
        assert_eq!(
            err.required,
            &[SaleStatus::Registering, SaleStatus::AwaitingPayment]
        );
    }

    #[test]
    fn test_status_serializes_screaming_snake_case() {
        let json = serde_json::to_string(&SaleStatus::AwaitingPayment).unwrap();
        assert_eq!(json, "\"AWAITING_PAYMENT\"");
    }
}
