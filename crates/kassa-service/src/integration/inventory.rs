//! In-process item catalog.

use std::cell::RefCell;
use std::collections::HashMap;

use kassa_core::validation::{validate_net_price, validate_vat_rate};
use kassa_core::{Amount, ItemId, ItemInfo, Percentage, SaleSnapshot, ValidationError};
use tracing::{debug, info};

use crate::error::ItemNotFoundError;
use crate::ports::InventoryLookup;

/// Catalog held in memory, with a per-item count of units sold.
#[derive(Debug, Default)]
pub struct InMemoryInventory {
    items: HashMap<ItemId, ItemInfo>,
    sold: RefCell<HashMap<ItemId, i64>>,
}

impl InMemoryInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// The ten-item demo catalog.
    pub fn with_sample_catalog() -> Result<Self, ValidationError> {
        const SAMPLE: [(u32, &str, &str, &str, u32); 10] = [
            (10001, "Milk 1L", "Fresh whole milk, 1 liter", "19.95", 12),
            (10002, "Bread loaf", "White bread loaf, ~500g", "37.90", 12),
            (10003, "Eggs (6-pack)", "Free-range eggs, pack of 6", "44.95", 12),
            (10004, "Coffee 500g", "Ground coffee, 500g bag", "97.95", 25),
            (10005, "Plastic bags (2L)", "Plastic freezer bags, 2L, 70-pack", "15.95", 25),
            (10006, "Butter 200g", "Salted butter, 200g stick", "24.95", 12),
            (10007, "Cheese 300g", "Gouda cheese, 300g", "44.95", 12),
            (10008, "Apple (1 kg)", "Red apples, 1 kg bag", "29.95", 12),
            (10009, "Tomahawk (900g)", "Tomahawk steak, 900g, Swedish", "449.00", 12),
            (10010, "Orange juice 1L", "Cold-pressed orange juice, 1L", "32.95", 12),
        ];

        let mut inventory = Self::new();
        for (id, name, description, price, vat) in SAMPLE {
            let price: Amount = price.parse()?;
            inventory.insert(ItemInfo::new(
                ItemId::new(id),
                name,
                description,
                price,
                Percentage::new(vat),
            ))?;
        }

        info!(items = inventory.items.len(), "Sample catalog loaded");
        Ok(inventory)
    }

    /// Adds or replaces a catalog entry.
    pub fn insert(&mut self, info: ItemInfo) -> Result<(), ValidationError> {
        validate_net_price(info.base_net_price)?;
        validate_vat_rate(info.vat_rate)?;
        self.items.insert(info.item_id, info);
        Ok(())
    }

    /// Units of `item_id` taken out of stock by paid sales so far.
    pub fn units_sold(&self, item_id: ItemId) -> i64 {
        self.sold.borrow().get(&item_id).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl InventoryLookup for InMemoryInventory {
    fn get_item_info(&self, item_id: ItemId) -> Result<ItemInfo, ItemNotFoundError> {
        self.items
            .get(&item_id)
            .cloned()
            .ok_or(ItemNotFoundError { item_id })
    }

    fn update_inventory(&self, sale: &SaleSnapshot) {
        let mut sold = self.sold.borrow_mut();
        for item in &sale.items {
            *sold.entry(item.item_id).or_insert(0) += item.quantity;
        }
        debug!(sale_id = %sale.sale_id, lines = sale.items.len(), "Inventory updated");
    }
}
