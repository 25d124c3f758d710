//! In-process accounting ledger.

use std::cell::{Cell, RefCell};

use kassa_core::{Amount, SaleSnapshot};
use tracing::info;

use crate::ports::AccountingRecorder;

/// Keeps every recorded sale and the revenue they add up to.
#[derive(Debug, Default)]
pub struct AccountingLedger {
    sales: RefCell<Vec<SaleSnapshot>>,
    revenue: Cell<Amount>,
}

impl AccountingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of the totals of all recorded sales.
    pub fn total_revenue(&self) -> Amount {
        self.revenue.get()
    }

    pub fn recorded_sales(&self) -> Vec<SaleSnapshot> {
        self.sales.borrow().clone()
    }
}

impl AccountingRecorder for AccountingLedger {
    fn record_sale(&self, sale: &SaleSnapshot) {
        self.revenue.set(self.revenue.get() + sale.total_cost);
        self.sales.borrow_mut().push(sale.clone());

        info!(
            sale_id = %sale.sale_id,
            total = %sale.total_cost,
            vat = %sale.total_vat,
            revenue = %self.revenue.get(),
            "Sale recorded in accounting"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kassa_core::{ItemId, ItemInfo, Percentage, Sale};

    #[test]
    fn test_revenue_accumulates() {
        let ledger = AccountingLedger::new();
        let mut sale = Sale::start();
        sale.add_item(
            ItemInfo::new(ItemId::new(10001), "Milk 1L", "", "19.95".parse().unwrap(), Percentage::new(12)),
            2,
        )
        .unwrap();

        ledger.record_sale(&sale.snapshot());
        ledger.record_sale(&sale.snapshot());

        assert_eq!(ledger.total_revenue(), "89.36".parse().unwrap());
        assert_eq!(ledger.recorded_sales().len(), 2);
    }
}
