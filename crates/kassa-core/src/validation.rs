//! # Validation Module
//!
//! Input checks the register applies before touching a sale.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cashier input (quantity, tendered cash)                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  SaleService (kassa-service)                                            │
//! │  └── THIS MODULE: rejects nonsense before the sale sees it              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Sale aggregate                                                         │
//! │  └── Lifecycle checks only; arithmetic accepts any quantity             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kassa_core::validation::{validate_quantity, validate_tendered_amount};
//!
//! validate_quantity(5).unwrap();
//! validate_tendered_amount("100.00".parse().unwrap()).unwrap();
//! ```

use crate::amount::{Amount, MAX_AMOUNT_UNITS};
use crate::error::ValidationError;
use crate::types::Percentage;
use crate::{MAX_ITEM_QUANTITY, MAX_VAT_RATE};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Register: Add Item                                                     │
/// │                                                                         │
/// │  Cashier enters quantity: 3                                             │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity(3) ← THIS FUNCTION                                   │
/// │       │                                                                 │
/// │       ├── qty <= 0?  → Error: "quantity must be positive"               │
/// │       │                                                                 │
/// │       ├── qty > 999? → Error: "quantity must be between 1 and 999"      │
/// │       │                                                                 │
/// │       └── OK → Proceed with add_item                                    │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates the cash a customer hands over.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_AMOUNT_UNITS
///
/// Whether it covers the sale total is checked by the register, which knows
/// the total.
pub fn validate_tendered_amount(amount: Amount) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "paid amount".to_string(),
        });
    }

    if !amount.is_within_limit() {
        return Err(ValidationError::OutOfRange {
            field: "paid amount".to_string(),
            min: 0,
            max: MAX_AMOUNT_UNITS,
        });
    }

    Ok(())
}

/// Validates a price coming from a catalog.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
/// - Must not exceed MAX_AMOUNT_UNITS
///
/// ## Example
/// ```rust
/// use kassa_core::validation::validate_net_price;
///
/// assert!(validate_net_price("19.95".parse().unwrap()).is_ok());
/// assert!(validate_net_price("0".parse().unwrap()).is_ok());
/// assert!(validate_net_price("-1".parse().unwrap()).is_err());
/// ```
pub fn validate_net_price(price: Amount) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    if !price.is_within_limit() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_AMOUNT_UNITS,
        });
    }

    Ok(())
}

/// Validates a VAT rate.
///
/// ## Rules
/// - Must be between 0 and MAX_VAT_RATE (100%)
pub fn validate_vat_rate(rate: Percentage) -> ValidationResult<()> {
    if rate.value() > MAX_VAT_RATE {
        return Err(ValidationError::OutOfRange {
            field: "vat_rate".to_string(),
            min: 0,
            max: i64::from(MAX_VAT_RATE),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
