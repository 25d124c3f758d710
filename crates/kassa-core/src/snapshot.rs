//! # Snapshots
//!
//! Read-only copies of a sale handed to callers and collaborators.
//!
//! A snapshot owns its data. Holding one never keeps the live sale alive, and
//! changes to the sale after the snapshot was taken are not visible through it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::amount::Amount;
use crate::lifecycle::SaleStatus;
use crate::payment::CashPayment;
use crate::types::{ItemId, Percentage, SaleId};

/// One sale line as seen from outside the sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleItemSnapshot {
    pub item_id: ItemId,
    pub name: String,
    pub description: String,
    pub base_net_price: Amount,
    pub vat_rate: Percentage,
    /// Unit price including VAT.
    pub final_unit_price: Amount,
    /// Line total including VAT.
    pub final_total_price: Amount,
    pub quantity: i64,
}

/// The whole sale at one moment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleSnapshot {
    pub sale_id: SaleId,
    pub started_at: DateTime<Utc>,
    pub total_cost: Amount,
    pub total_vat: Amount,
    /// Lines in the order they were first added.
    pub items: Vec<SaleItemSnapshot>,
    pub last_added_item: Option<ItemId>,
    pub payment: Option<CashPayment>,
    pub status: SaleStatus,
}

impl SaleSnapshot {
    /// Finds a line by item id.
    pub fn item(&self, item_id: ItemId) -> Option<&SaleItemSnapshot> {
        self.items.iter().find(|item| item.item_id == item_id)
    }

    /// The line touched by the most recent add or increase.
    pub fn last_added(&self) -> Option<&SaleItemSnapshot> {
        self.last_added_item.and_then(|id| self.item(id))
    }

    /// Total quantity over all lines.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}
