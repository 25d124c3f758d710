//! # Collaborator Implementations
//!
//! In-process implementations of the [`ports`](crate::ports) traits used by
//! the demo register.
//!
//! | Port | Implementation |
//! |---|---|
//! | `InventoryLookup` | [`InMemoryInventory`] |
//! | `DiscountService` | [`UnavailableDiscountService`] |
//! | `AccountingRecorder` | [`AccountingLedger`] |
//! | `ReceiptSink` | [`ConsoleReceiptPrinter`] |
//! | `RevenueObserver` | [`TotalRevenueFileOutput`] |

mod accounting;
mod discount;
mod inventory;
mod receipt_printer;
mod revenue_log;

pub use accounting::AccountingLedger;
pub use discount::UnavailableDiscountService;
pub use inventory::InMemoryInventory;
pub use receipt_printer::ConsoleReceiptPrinter;
pub use revenue_log::TotalRevenueFileOutput;
