//! # Sale Aggregate
//!
//! A single customer transaction: its lines, its running totals, its payment
//! and its lifecycle.
//!
//! ## Running Totals
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  For every add / increase of `qty` units of an item:                    │
//! │                                                                         │
//! │    added_net   = base_net_price   × qty     ← from the NET price        │
//! │    added_gross = final_unit_price × qty     ← VAT-inclusive             │
//! │    added_vat   = added_gross - added_net                                │
//! │                                                                         │
//! │    total_cost += added_gross                                            │
//! │    total_vat  += added_vat                                              │
//! │                                                                         │
//! │  Totals are only ever added to, never recomputed from the lines.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The net part is taken from the base price, not backed out of the gross
//! price, so VAT never picks up a second rounding.
//!
//! ## Invariants
//! After every mutation:
//! - `total_cost` is the sum of `final_unit_price × quantity` over all lines
//! - `total_vat` is the sum of `(final_unit_price - base_net_price) × quantity`
//! - lines change only while [`SaleStatus::Registering`]
//! - `payment` is present exactly when the sale is [`SaleStatus::Paid`]

use chrono::{DateTime, Utc};

use crate::amount::Amount;
use crate::error::{CoreError, CoreResult, ExecutionOrderError};
use crate::lifecycle::{transition, SaleOperation, SaleStatus};
use crate::payment::CashPayment;
use crate::sale_item::SaleItem;
use crate::snapshot::SaleSnapshot;
use crate::types::{CustomerId, Discount, DiscountRequest, ItemId, ItemInfo, SaleId};

/// The sale aggregate.
#[derive(Debug, Clone)]
pub struct Sale {
    id: SaleId,
    started_at: DateTime<Utc>,
    /// Lines in first-added order; item ids are unique.
    items: Vec<SaleItem>,
    last_added_item: Option<ItemId>,
    total_cost: Amount,
    total_vat: Amount,
    payment: Option<CashPayment>,
    status: SaleStatus,
}

impl Sale {
    /// Creates an empty sale in [`SaleStatus::Registering`].
    pub fn new(id: SaleId, started_at: DateTime<Utc>) -> Self {
        Self {
            id,
            started_at,
            items: Vec::new(),
            last_added_item: None,
            total_cost: Amount::zero(),
            total_vat: Amount::zero(),
            payment: None,
            status: SaleStatus::Registering,
        }
    }

    /// Creates a sale with a fresh id, started now.
    pub fn start() -> Self {
        Self::new(SaleId::generate(), Utc::now())
    }

    // =========================================================================
    // Lifecycle Operations
    // =========================================================================

    /// Adds `quantity` units of an item.
    ///
    /// If a line for the item already exists, its quantity is increased
    /// instead, so item ids stay unique.
    ///
    /// ## Example
    /// ```rust
    /// use kassa_core::{ItemId, ItemInfo, Percentage, Sale};
    ///
    /// let milk = ItemInfo::new(
    ///     ItemId::new(10001),
    ///     "Milk 1L",
    ///     "Fresh whole milk, 1 liter",
    ///     "19.95".parse().unwrap(),
    ///     Percentage::new(12),
    /// );
    ///
    /// let mut sale = Sale::start();
    /// sale.add_item(milk, 2).unwrap();
    ///
    /// assert_eq!(sale.total_cost().to_string(), "44.68");
    /// assert_eq!(sale.total_vat().to_string(), "4.78");
    /// ```
    pub fn add_item(&mut self, info: ItemInfo, quantity: i64) -> Result<(), ExecutionOrderError> {
        self.status = transition(self.status, SaleOperation::AddItem)?;

        let item_id = info.item_id;
        let index = match self.position_of(item_id) {
            Some(index) => {
                self.items[index].increase_quantity(quantity);
                index
            }
            None => {
                self.items.push(SaleItem::new(info, quantity));
                self.items.len() - 1
            }
        };

        self.update_sale_cost(index, quantity);
        self.last_added_item = Some(item_id);
        Ok(())
    }

    /// Adds `quantity` units to a line that is already in the sale.
    ///
    /// ## Errors
    /// - [`CoreError::ExecutionOrder`] unless registering
    /// - [`CoreError::ItemNotInSale`] if no line has this id
    pub fn increase_quantity(&mut self, item_id: ItemId, quantity: i64) -> CoreResult<()> {
        let next = transition(self.status, SaleOperation::IncreaseQuantity)?;
        let index = self
            .position_of(item_id)
            .ok_or(CoreError::ItemNotInSale(item_id))?;

        self.status = next;
        self.items[index].increase_quantity(quantity);
        self.update_sale_cost(index, quantity);
        self.last_added_item = Some(item_id);
        Ok(())
    }

    /// Closes item registration. The total is final from here on.
    pub fn end(&mut self) -> Result<(), ExecutionOrderError> {
        self.status = transition(self.status, SaleOperation::End)?;
        Ok(())
    }

    /// Abandons the sale.
    pub fn cancel(&mut self) -> Result<(), ExecutionOrderError> {
        self.status = transition(self.status, SaleOperation::Cancel)?;
        Ok(())
    }

    /// Stores the payment and marks the sale paid.
    pub fn record_payment(&mut self, payment: CashPayment) -> Result<(), ExecutionOrderError> {
        self.status = transition(self.status, SaleOperation::RecordPayment)?;
        self.payment = Some(payment);
        Ok(())
    }

    /// Succeeds only while the sale is waiting for payment.
    pub fn ensure_awaiting_payment(&self) -> Result<(), ExecutionOrderError> {
        transition(self.status, SaleOperation::EnsureAwaitingPayment).map(|_| ())
    }

    /// Accepts a discount while the sale is waiting for payment.
    ///
    /// Prices are left as they are: there is no discount rule to apply yet.
    pub fn apply_discount(&mut self, _discount: &Discount) -> Result<(), ExecutionOrderError> {
        self.status = transition(self.status, SaleOperation::ApplyDiscount)?;
        Ok(())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    #[inline]
    pub fn id(&self) -> SaleId {
        self.id
    }

    #[inline]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[inline]
    pub fn status(&self) -> SaleStatus {
        self.status
    }

    /// Total including VAT.
    #[inline]
    pub fn total_cost(&self) -> Amount {
        self.total_cost
    }

    #[inline]
    pub fn total_vat(&self) -> Amount {
        self.total_vat
    }

    #[inline]
    pub fn items(&self) -> &[SaleItem] {
        &self.items
    }

    pub fn item(&self, item_id: ItemId) -> Option<&SaleItem> {
        self.items.iter().find(|item| item.item_id() == item_id)
    }

    pub fn contains_item(&self, item_id: ItemId) -> bool {
        self.position_of(item_id).is_some()
    }

    pub fn last_added_item(&self) -> Option<&SaleItem> {
        self.last_added_item.and_then(|id| self.item(id))
    }

    #[inline]
    pub fn payment(&self) -> Option<&CashPayment> {
        self.payment.as_ref()
    }

    /// Read-only copy of the whole sale.
    pub fn snapshot(&self) -> SaleSnapshot {
        SaleSnapshot {
            sale_id: self.id,
            started_at: self.started_at,
            total_cost: self.total_cost,
            total_vat: self.total_vat,
            items: self.items.iter().map(SaleItem::snapshot).collect(),
            last_added_item: self.last_added_item,
            payment: self.payment,
            status: self.status,
        }
    }

    /// What the discount service needs to know about this sale.
    pub fn discount_request(&self, customer_id: CustomerId) -> DiscountRequest {
        DiscountRequest {
            customer_id,
            total_price: self.total_cost,
            items: self.items.iter().map(SaleItem::snapshot).collect(),
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn position_of(&self, item_id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.item_id() == item_id)
    }

    fn update_sale_cost(&mut self, index: usize, quantity: i64) {
        let line = &self.items[index];
        let added_net = line.base_net_price().multiply_by_quantity(quantity);
        let added_gross = line.final_unit_price().multiply_by_quantity(quantity);
        let added_vat = added_gross - added_net;

        self.total_cost += added_gross;
        self.total_vat += added_vat;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Percentage;
    use proptest::prelude::*;

    fn amount(s: &str) -> Amount {
        s.parse().unwrap()
    }

    fn item(id: u32, net: &str, vat: u32) -> ItemInfo {
        ItemInfo::new(ItemId::new(id), format!("Item {id}"), "", amount(net), Percentage::new(vat))
    }

    fn milk() -> ItemInfo {
        item(10001, "19.95", 12)
    }

    fn ended_sale() -> Sale {
        let mut sale = Sale::start();
        sale.add_item(milk(), 2).unwrap();
        sale.end().unwrap();
        sale
    }

    #[test]
    fn test_milk_scenario_totals() {
        let mut sale = Sale::start();
        sale.add_item(milk(), 2).unwrap();

        let line = sale.item(ItemId::new(10001)).unwrap();
        assert_eq!(line.final_unit_price(), amount("22.34"));
        assert_eq!(line.final_total_price(), amount("44.68"));
        assert_eq!(sale.total_cost(), amount("44.68"));
        assert_eq!(sale.total_vat(), amount("4.78"));
        assert_eq!(sale.last_added_item().map(SaleItem::item_id), Some(ItemId::new(10001)));
    }

    #[test]
    fn test_increase_quantity_updates_line_and_totals() {
        let mut sale = Sale::start();
        sale.add_item(milk(), 1).unwrap();
        sale.add_item(item(10004, "97.95", 25), 1).unwrap();
        sale.increase_quantity(ItemId::new(10001), 1).unwrap();

        assert_eq!(sale.items().len(), 2);
        assert_eq!(sale.item(ItemId::new(10001)).unwrap().quantity(), 2);
        assert_eq!(sale.last_added_item().unwrap().item_id(), ItemId::new(10001));
        // 44.68 + 122.44
        assert_eq!(sale.total_cost(), amount("167.12"));
        // 4.78 + 24.49
        assert_eq!(sale.total_vat(), amount("29.27"));
    }

    #[test]
    fn test_add_existing_item_merges_lines() {
        let mut sale = Sale::start();
        sale.add_item(milk(), 1).unwrap();
        sale.add_item(milk(), 1).unwrap();

        assert_eq!(sale.items().len(), 1);
        assert_eq!(sale.items()[0].quantity(), 2);
        assert_eq!(sale.total_cost(), amount("44.68"));
    }

    #[test]
    fn test_increase_unknown_item_fails_without_changes() {
        let mut sale = Sale::start();
        sale.add_item(milk(), 1).unwrap();

        let err = sale.increase_quantity(ItemId::new(999), 1).unwrap_err();
        assert_eq!(err, CoreError::ItemNotInSale(ItemId::new(999)));
        assert_eq!(sale.total_cost(), amount("22.34"));
    }

    #[test]
    fn test_end_twice_reports_awaiting_payment() {
        let mut sale = ended_sale();
        let err = sale.end().unwrap_err();

        assert_eq!(err.operation, SaleOperation::End);
        assert_eq!(err.current, SaleStatus::AwaitingPayment);
        assert_eq!(err.required, &[SaleStatus::Registering]);
    }

    #[test]
    fn test_no_item_changes_after_end() {
        let mut sale = ended_sale();

        let err = sale.add_item(item(10002, "37.90", 12), 1).unwrap_err();
        assert_eq!(err.current, SaleStatus::AwaitingPayment);

        let err = sale.increase_quantity(ItemId::new(10001), 1).unwrap_err();
        assert!(matches!(err, CoreError::ExecutionOrder(_)));
        assert_eq!(sale.total_cost(), amount("44.68"));
    }

    #[test]
    fn test_record_payment_before_end_fails() {
        let mut sale = Sale::start();
        sale.add_item(milk(), 2).unwrap();

        let payment = CashPayment::new(sale.total_cost(), amount("50"));
        let err = sale.record_payment(payment).unwrap_err();

        assert_eq!(err.current, SaleStatus::Registering);
        assert_eq!(err.required, &[SaleStatus::AwaitingPayment]);
        assert!(sale.payment().is_none());
    }

    #[test]
    fn test_payment_present_only_when_paid() {
        let mut sale = ended_sale();
        assert!(sale.payment().is_none());

        let payment = CashPayment::new(sale.total_cost(), amount("50.00"));
        sale.record_payment(payment).unwrap();

        assert_eq!(sale.status(), SaleStatus::Paid);
        assert_eq!(sale.payment().unwrap().change(), amount("5.32"));
    }

    #[test]
    fn test_cancel_after_paid_fails() {
        let mut sale = ended_sale();
        sale.record_payment(CashPayment::new(sale.total_cost(), amount("50")))
            .unwrap();

        let err = sale.cancel().unwrap_err();
        assert_eq!(err.current, SaleStatus::Paid);
        assert_eq!(sale.status(), SaleStatus::Paid);
    }

    #[test]
    fn test_cancel_from_both_open_states() {
        let mut registering = Sale::start();
        registering.cancel().unwrap();
        assert_eq!(registering.status(), SaleStatus::Cancelled);
        assert!(registering.cancel().is_err());

        let mut awaiting = ended_sale();
        awaiting.cancel().unwrap();
        assert_eq!(awaiting.status(), SaleStatus::Cancelled);
        assert!(awaiting.payment().is_none());
    }

    #[test]
    fn test_ensure_awaiting_payment() {
        let mut sale = Sale::start();
        assert!(sale.ensure_awaiting_payment().is_err());

        sale.end().unwrap();
        assert!(sale.ensure_awaiting_payment().is_ok());
        assert_eq!(sale.status(), SaleStatus::AwaitingPayment);
    }

    #[test]
    fn test_apply_discount_changes_nothing() {
        let mut sale = ended_sale();
        sale.apply_discount(&Discount::none()).unwrap();

        assert_eq!(sale.status(), SaleStatus::AwaitingPayment);
        assert_eq!(sale.total_cost(), amount("44.68"));

        let mut registering = Sale::start();
        assert!(registering.apply_discount(&Discount::none()).is_err());
    }

    #[test]
    fn test_snapshot_does_not_alias_sale() {
        let mut sale = Sale::start();
        sale.add_item(milk(), 1).unwrap();
        let before = sale.snapshot();

        sale.increase_quantity(ItemId::new(10001), 4).unwrap();

        assert_eq!(before.items[0].quantity, 1);
        assert_eq!(before.total_cost, amount("22.34"));
        assert_eq!(sale.snapshot().items[0].quantity, 5);
    }

    #[test]
    fn test_discount_request_uses_current_totals() {
        let sale = ended_sale();
        let request = sale.discount_request(CustomerId::new(1));

        assert_eq!(request.customer_id, CustomerId::new(1));
        assert_eq!(request.total_price, amount("44.68"));
        assert_eq!(request.items.len(), 1);
    }

    // =========================================================================
    // Property Tests
    // =========================================================================

    #[derive(Debug, Clone)]
    enum Step {
        Add { catalog_index: usize, quantity: i64 },
        Increase { catalog_index: usize, quantity: i64 },
    }

    fn catalog() -> Vec<ItemInfo> {
        vec![
            item(10001, "19.95", 12),
            item(10004, "97.95", 25),
            item(10005, "15.95", 25),
            item(10009, "449.00", 12),
            item(20001, "0.99", 6),
        ]
    }

    fn step() -> impl Strategy<Value = Step> {
        prop_oneof![
            (0usize..5, 1i64..20).prop_map(|(catalog_index, quantity)| Step::Add {
                catalog_index,
                quantity
            }),
            (0usize..5, -5i64..20).prop_map(|(catalog_index, quantity)| Step::Increase {
                catalog_index,
                quantity
            }),
        ]
    }

    proptest! {
        #[test]
        fn test_totals_match_lines_for_any_interleaving(steps in prop::collection::vec(step(), 0..40)) {
            let catalog = catalog();
            let mut sale = Sale::start();

            for step in steps {
                match step {
                    Step::Add { catalog_index, quantity } => {
                        sale.add_item(catalog[catalog_index].clone(), quantity).unwrap();
                    }
                    Step::Increase { catalog_index, quantity } => {
                        let id = catalog[catalog_index].item_id;
                        let result = sale.increase_quantity(id, quantity);
                        prop_assert_eq!(result.is_ok(), sale.contains_item(id));
                    }
                }

                let expected_cost: Amount = sale
                    .items()
                    .iter()
                    .map(|line| line.final_unit_price().multiply_by_quantity(line.quantity()))
                    .sum();
                let expected_vat: Amount = sale
                    .items()
                    .iter()
                    .map(|line| {
                        (line.final_unit_price() - line.base_net_price())
                            .multiply_by_quantity(line.quantity())
                    })
                    .sum();

                prop_assert_eq!(sale.total_cost(), expected_cost);
                prop_assert_eq!(sale.total_vat(), expected_vat);
                prop_assert_eq!(sale.status(), SaleStatus::Registering);
            }
        }
    }
}
