//! # kassa-core: Pure Sale Domain for Kassa POS
//!
//! This crate is the **heart** of Kassa POS. It models one sale from the
//! first scanned item to the cash payment, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kassa POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                    kassa-cli (register view)                    │    │
//! │  │    start ──► add items ──► end ──► discount ──► pay             │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │                    kassa-service                                │    │
//! │  │    SaleService, PaymentService, collaborator ports              │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │               ★ kassa-core (THIS CRATE) ★                       │    │
//! │  │                                                                 │    │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐    │    │
//! │  │   │  amount   │  │   sale    │  │ lifecycle │  │  payment  │    │    │
//! │  │   │  Amount   │  │   Sale    │  │ transition│  │ CashPaym. │    │    │
//! │  │   │  VAT ops  │  │ SaleItem  │  │  table    │  │ Register  │    │    │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘    │    │
//! │  │                                                                 │    │
//! │  │   NO I/O • NO COLLABORATORS • NO LOGGING SETUP                  │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`amount`] - Exact two-decimal money with VAT operations
//! - [`types`] - Identifiers, `ItemInfo`, discount DTOs
//! - [`sale_item`] / [`sale`] - The sale aggregate and its lines
//! - [`lifecycle`] - Sale states and the single transition function
//! - [`payment`] / [`register`] - Cash payment and drawer balance
//! - [`snapshot`] - Read-only copies handed out of the aggregate
//! - [`receipt`] - Receipt text layout
//! - [`error`] - Domain error types
//! - [`validation`] - Input rules applied by the register
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Same input, same output (the clock in `Sale::start` aside)
//! 2. **No I/O**: Inventory, accounting and printing live behind traits elsewhere
//! 3. **Exact Money**: Decimals rounded half-up after every operation
//! 4. **Explicit Errors**: Lifecycle violations are values, never panics
//!
//! ## Example Usage
//!
//! ```rust
//! use kassa_core::{CashPayment, ItemId, ItemInfo, Percentage, Sale};
//!
//! let milk = ItemInfo::new(
//!     ItemId::new(10001),
//!     "Milk 1L",
//!     "Fresh whole milk, 1 liter",
//!     "19.95".parse().unwrap(),
//!     Percentage::new(12),
//! );
//!
//! let mut sale = Sale::start();
//! sale.add_item(milk, 2).unwrap();
//! sale.end().unwrap();
//!
//! let payment = CashPayment::new(sale.total_cost(), "50.00".parse().unwrap());
//! sale.record_payment(payment).unwrap();
//!
//! assert_eq!(payment.change().to_string(), "5.32");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod amount;
pub mod error;
pub mod lifecycle;
pub mod payment;
pub mod receipt;
pub mod register;
pub mod sale;
pub mod sale_item;
pub mod snapshot;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use kassa_core::Amount` instead of
// `use kassa_core::amount::Amount`

pub use amount::{Amount, MAX_AMOUNT_UNITS};
pub use error::{CoreError, CoreResult, ExecutionOrderError, ValidationError};
pub use lifecycle::{SaleOperation, SaleStatus};
pub use payment::CashPayment;
pub use receipt::Receipt;
pub use register::CashRegister;
pub use sale::Sale;
pub use sale_item::SaleItem;
pub use snapshot::{SaleItemSnapshot, SaleSnapshot};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity of a single item in one registration
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10)
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Highest VAT rate a catalog entry may carry, in percent.
pub const MAX_VAT_RATE: u32 = 100;
