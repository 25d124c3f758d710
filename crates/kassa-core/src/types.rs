//! # Domain Types
//!
//! Identifiers and read-only value types used throughout Kassa POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐        │
//! │  │    ItemInfo     │   │     SaleId      │   │ DiscountRequest │        │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │        │
//! │  │  item_id        │   │  UUID v4        │   │  customer_id    │        │
//! │  │  name           │   └─────────────────┘   │  total_price    │        │
//! │  │  description    │                         │  items          │        │
//! │  │  base_net_price │   ┌─────────────────┐   └─────────────────┘        │
//! │  │  vat_rate       │   │   Percentage    │                              │
//! │  └─────────────────┘   │  ─────────────  │   ┌─────────────────┐        │
//! │                        │  12 = 12%       │   │    Discount     │        │
//! │  ┌─────────────────┐   └─────────────────┘   │  (extension pt) │        │
//! │  │ ItemId / Cust.  │                         └─────────────────┘        │
//! │  │  u32 newtypes   │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `ItemInfo` is owned by the inventory: the sale keeps a copy and never
//! changes it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::amount::Amount;
use crate::snapshot::SaleItemSnapshot;

// =============================================================================
// Percentage
// =============================================================================

/// A non-negative whole percentage, e.g. `Percentage::new(12)` for 12% VAT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage(u32);

impl Percentage {
    /// Creates a percentage from whole percent.
    #[inline]
    pub const fn new(percent: u32) -> Self {
        Percentage(percent)
    }

    /// Zero percent.
    #[inline]
    pub const fn zero() -> Self {
        Percentage(0)
    }

    /// Returns the whole-percent value.
    #[inline]
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// Returns `percent / 100` as an exact decimal (12% → 0.12).
    pub fn fraction(&self) -> Decimal {
        Decimal::from(self.0) / Decimal::ONE_HUNDRED
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

// =============================================================================
// Identifiers
// =============================================================================

/// Inventory identifier of an item (the number on the shelf label).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u32);

impl ItemId {
    #[inline]
    pub const fn new(id: u32) -> Self {
        ItemId(id)
    }

    #[inline]
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a customer asking for a discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(u32);

impl CustomerId {
    #[inline]
    pub const fn new(id: u32) -> Self {
        CustomerId(id)
    }

    #[inline]
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier of a sale.
///
/// ## Why UUID v4?
/// Unique without a counter or a database, so every register can mint its
/// own sale ids without coordination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SaleId(Uuid);

impl SaleId {
    /// Generates a fresh random sale id.
    pub fn generate() -> Self {
        SaleId(Uuid::new_v4())
    }

    #[inline]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for SaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Item Info
// =============================================================================

/// Static description of an item as held by the inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemInfo {
    /// Inventory identifier.
    pub item_id: ItemId,

    /// Display name shown to the cashier and on the receipt.
    pub name: String,

    /// Longer description shown by the view.
    pub description: String,

    /// Unit price before VAT.
    pub base_net_price: Amount,

    /// VAT rate applied on top of the net price.
    pub vat_rate: Percentage,
}

impl ItemInfo {
    pub fn new(
        item_id: ItemId,
        name: impl Into<String>,
        description: impl Into<String>,
        base_net_price: Amount,
        vat_rate: Percentage,
    ) -> Self {
        Self {
            item_id,
            name: name.into(),
            description: description.into(),
            base_net_price,
            vat_rate,
        }
    }
}

// =============================================================================
// Discounts
// =============================================================================

/// What is sent to the discount service: who is buying and what.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountRequest {
    pub customer_id: CustomerId,
    /// Current sale total including VAT.
    pub total_price: Amount,
    pub items: Vec<SaleItemSnapshot>,
}

/// A discount granted by the discount service.
///
/// Nothing computes these yet; `Sale::apply_discount` accepts one without
/// changing any price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discount {
    /// Fixed amount off the total.
    pub discount_amount: Amount,
    /// Percentage off the whole sale.
    pub sale_discount_percentage: Percentage,
    /// Percentage off for this particular customer.
    pub customer_discount_percentage: Percentage,
}

impl Discount {
    /// A discount that takes nothing off.
    pub fn none() -> Self {
        Self {
            discount_amount: Amount::zero(),
            sale_discount_percentage: Percentage::zero(),
            customer_discount_percentage: Percentage::zero(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_percentage_fraction() {
        assert_eq!(Percentage::new(12).fraction(), dec!(0.12));
        assert_eq!(Percentage::new(25).fraction(), dec!(0.25));
        assert_eq!(Percentage::zero().fraction(), Decimal::ZERO);
        assert_eq!(Percentage::new(12).to_string(), "12%");
    }

    #[test]
    fn test_sale_ids_are_unique() {
        let a = SaleId::generate();
        let b = SaleId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_uuid().get_version_num(), 4);
    }

    #[test]
    fn test_identifiers_serialize_transparently() {
        assert_eq!(serde_json::to_string(&ItemId::new(10001)).unwrap(), "10001");
        assert_eq!(serde_json::to_string(&Percentage::new(12)).unwrap(), "12");
    }

    #[test]
    fn test_discount_none_is_zero() {
        let discount = Discount::none();
        assert!(discount.discount_amount.is_zero());
        assert_eq!(discount.sale_discount_percentage, Percentage::zero());
    }
}
