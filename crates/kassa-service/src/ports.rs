//! # Collaborator Ports
//!
//! The traits the sale service uses to reach everything outside the sale.
//!
//! ## Contracts
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  InventoryLookup.get_item_info(id)     -> ItemInfo | ItemNotFound       │
//! │  InventoryLookup.update_inventory(sale)                                 │
//! │  DiscountService.get_discount(request) -> Discount | ServiceUnavailable │
//! │  AccountingRecorder.record_sale(sale)                                   │
//! │  ReceiptSink.print_receipt(text)                                        │
//! │  RevenueObserver.payment_received(payment)                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every method takes `&self` and receives snapshots or plain values, never
//! the live sale. Implementations that keep state use interior mutability.
//! The calls after a payment have no return value: the payment is already
//! recorded on the sale when they run.

use kassa_core::{CashPayment, Discount, DiscountRequest, ItemId, ItemInfo, SaleSnapshot};

use crate::error::{ItemNotFoundError, ServiceUnavailableError};

/// Item catalog and stock.
pub trait InventoryLookup {
    /// Looks up an item by id.
    fn get_item_info(&self, item_id: ItemId) -> Result<ItemInfo, ItemNotFoundError>;

    /// Takes the items of a paid sale out of stock.
    fn update_inventory(&self, sale: &SaleSnapshot);
}

/// Customer discounts.
pub trait DiscountService {
    fn get_discount(&self, request: &DiscountRequest) -> Result<Discount, ServiceUnavailableError>;
}

/// Bookkeeping of completed sales.
pub trait AccountingRecorder {
    fn record_sale(&self, sale: &SaleSnapshot);
}

/// Wherever receipts end up (console, printer).
pub trait ReceiptSink {
    fn print_receipt(&self, receipt: &str);
}

/// Notified once per completed payment.
pub trait RevenueObserver {
    fn payment_received(&self, payment: &CashPayment);
}
