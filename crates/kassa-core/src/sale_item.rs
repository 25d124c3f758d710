//! # Sale Item
//!
//! One line on the sale: what the item is, how many, and what it costs.
//!
//! ## Pricing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  base_net_price ── increase_by(vat_rate) ──► final_unit_price           │
//! │                    (rounded ONCE, at construction, never again)         │
//! │                                                                         │
//! │  final_total_price = final_unit_price × initial quantity                │
//! │                    + final_unit_price × delta   (per increase)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The line total is maintained incrementally. Because the unit price is
//! already rounded, three increases of one and a single increase of three end
//! on the same total.

use crate::amount::Amount;
use crate::snapshot::SaleItemSnapshot;
use crate::types::{ItemId, ItemInfo, Percentage};

/// A line item within a sale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleItem {
    info: ItemInfo,
    quantity: i64,
    final_unit_price: Amount,
    final_total_price: Amount,
}

impl SaleItem {
    /// Creates a line from inventory info and a starting quantity.
    ///
    /// ## Example
    /// ```rust
    /// use kassa_core::{Amount, ItemId, ItemInfo, Percentage, SaleItem};
    ///
    /// let info = ItemInfo::new(
    ///     ItemId::new(10001),
    ///     "Milk 1L",
    ///     "Fresh whole milk, 1 liter",
    ///     "19.95".parse().unwrap(),
    ///     Percentage::new(12),
    /// );
    /// let item = SaleItem::new(info, 2);
    ///
    /// assert_eq!(item.final_unit_price().to_string(), "22.34");
    /// assert_eq!(item.final_total_price().to_string(), "44.68");
    /// ```
    pub fn new(info: ItemInfo, quantity: i64) -> Self {
        let final_unit_price = info.base_net_price.increase_by(info.vat_rate);
        let final_total_price = final_unit_price.multiply_by_quantity(quantity);

        Self {
            info,
            quantity,
            final_unit_price,
            final_total_price,
        }
    }

    /// Adds `delta` to the quantity and the matching amount to the line total.
    pub fn increase_quantity(&mut self, delta: i64) {
        self.quantity += delta;
        self.final_total_price += self.final_unit_price.multiply_by_quantity(delta);
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn item_id(&self) -> ItemId {
        self.info.item_id
    }

    #[inline]
    pub fn info(&self) -> &ItemInfo {
        &self.info
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.info.name
    }

    #[inline]
    pub fn base_net_price(&self) -> Amount {
        self.info.base_net_price
    }

    #[inline]
    pub fn vat_rate(&self) -> Percentage {
        self.info.vat_rate
    }

    #[inline]
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Unit price including VAT.
    #[inline]
    pub fn final_unit_price(&self) -> Amount {
        self.final_unit_price
    }

    /// Line total including VAT.
    #[inline]
    pub fn final_total_price(&self) -> Amount {
        self.final_total_price
    }

    /// Read-only copy for callers outside the aggregate.
    pub fn snapshot(&self) -> SaleItemSnapshot {
        SaleItemSnapshot {
            item_id: self.info.item_id,
            name: self.info.name.clone(),
            description: self.info.description.clone(),
            base_net_price: self.info.base_net_price,
            vat_rate: self.info.vat_rate,
            final_unit_price: self.final_unit_price,
            final_total_price: self.final_total_price,
            quantity: self.quantity,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn coffee() -> ItemInfo {
        ItemInfo::new(
            ItemId::new(10004),
            "Coffee 500g",
            "Ground coffee, 500g bag",
            "97.95".parse().unwrap(),
            Percentage::new(25),
        )
    }

    #[test]
    fn test_unit_price_includes_vat() {
        // 97.95 × 1.25 = 122.4375 → 122.44
        let item = SaleItem::new(coffee(), 3);
        assert_eq!(item.final_unit_price(), "122.44".parse().unwrap());
        assert_eq!(item.final_total_price(), "367.32".parse().unwrap());
        assert_eq!(item.quantity(), 3);
    }

    #[test]
    fn test_increase_quantity_is_incremental() {
        let mut stepwise = SaleItem::new(coffee(), 1);
        stepwise.increase_quantity(1);
        stepwise.increase_quantity(1);

        let mut at_once = SaleItem::new(coffee(), 1);
        at_once.increase_quantity(2);

        assert_eq!(stepwise, at_once);
        assert_eq!(stepwise.final_total_price(), SaleItem::new(coffee(), 3).final_total_price());
    }

    #[test]
    fn test_negative_delta_reduces_line() {
        let mut item = SaleItem::new(coffee(), 3);
        item.increase_quantity(-1);
        assert_eq!(item.quantity(), 2);
        assert_eq!(item.final_total_price(), "244.88".parse().unwrap());
    }

    #[test]
    fn test_snapshot_copies_fields() {
        let item = SaleItem::new(coffee(), 2);
        let snapshot = item.snapshot();

        assert_eq!(snapshot.item_id, ItemId::new(10004));
        assert_eq!(snapshot.name, "Coffee 500g");
        assert_eq!(snapshot.final_unit_price, item.final_unit_price());
        assert_eq!(snapshot.quantity, 2);
    }
}
