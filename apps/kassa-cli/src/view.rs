//! # Console View
//!
//! Stands in for the cashier's terminal. [`View::sample_run`] plays two
//! scripted sales against the [`SaleService`] and prints what a cashier
//! would see after each step.
//!
//! ## Script
//! ```text
//! Sale 1: 10101 x1 (unknown)  10004 x3  10009 x1
//!         end, discount for customer 1, pay 1000.00
//! Sale 2: 10102 x1 (unknown)  10007 x3
//!         end, pay 1000.00
//! ```
//!
//! Failed steps are reported and the script carries on, the same way a
//! cashier would re-scan or skip an item.

use std::cell::Cell;
use std::io::{self, Stdout, Write};

use kassa_core::{Amount, CashPayment, CustomerId, ItemId, SaleItemSnapshot};
use kassa_service::{RevenueObserver, SaleService, SaleServiceError};
use tracing::info;

/// One scripted sale.
struct ScriptedSale {
    items: &'static [(u32, i64)],
    discount_for: Option<u32>,
    tendered_units: i64,
}

const SAMPLE_SALES: [ScriptedSale; 2] = [
    ScriptedSale {
        items: &[(10101, 1), (10004, 3), (10009, 1)],
        discount_for: Some(1),
        tendered_units: 1000,
    },
    ScriptedSale {
        items: &[(10102, 1), (10007, 3)],
        discount_for: None,
        tendered_units: 1000,
    },
];

// =============================================================================
// View
// =============================================================================

/// Console front end over a [`SaleService`].
pub struct View<W: Write = Stdout> {
    service: SaleService,
    currency: String,
    out: W,
}

impl View<Stdout> {
    pub fn new(service: SaleService, currency: impl Into<String>) -> Self {
        Self::with_writer(service, currency, io::stdout())
    }
}

impl<W: Write> View<W> {
    pub fn with_writer(service: SaleService, currency: impl Into<String>, out: W) -> Self {
        Self {
            service,
            currency: currency.into(),
            out,
        }
    }

    pub fn service(&self) -> &SaleService {
        &self.service
    }

    pub fn into_writer(self) -> W {
        self.out
    }

    /// Plays the scripted sales.
    ///
    /// Only console write failures are returned; sale failures are printed.
    pub fn sample_run(&mut self) -> io::Result<()> {
        for (n, sale) in SAMPLE_SALES.iter().enumerate() {
            info!(sale = n + 1, "Scripted sale starting");
            self.run_sale(sale)?;
        }
        Ok(())
    }

    fn run_sale(&mut self, sale: &ScriptedSale) -> io::Result<()> {
        if let Err(e) = self.service.start_sale() {
            return self.report(&e);
        }

        for &(item_id, quantity) in sale.items {
            self.add_item(ItemId::new(item_id), quantity)?;
        }

        writeln!(self.out, "End sale:")?;
        match self.service.end_sale() {
            Ok(total) => {
                writeln!(self.out, "Total cost (incl. VAT): {}", self.money(total))?;
                writeln!(self.out)?;
            }
            Err(e) => return self.report(&e),
        }

        if let Some(customer) = sale.discount_for {
            self.request_discount(CustomerId::new(customer))?;
        }

        match self.service.process_cash_payment(Amount::from_units(sale.tendered_units)) {
            Ok(change) => {
                writeln!(self.out, "Change to give the customer: {}", self.money(change))?;
                writeln!(self.out)?;
                Ok(())
            }
            Err(e) => self.report(&e),
        }
    }

    fn add_item(&mut self, item_id: ItemId, quantity: i64) -> io::Result<()> {
        writeln!(self.out, "Add {quantity} item with id {item_id}:")?;

        let snapshot = match self.service.add_item(item_id, quantity) {
            Ok(snapshot) => snapshot,
            Err(e) => return self.report(&e),
        };

        if let Some(item) = snapshot.item(item_id) {
            self.print_item(item)?;
        }
        writeln!(self.out, "Total cost (incl. VAT): {}", self.money(snapshot.total_cost))?;
        writeln!(self.out, "Total VAT: {}", self.money(snapshot.total_vat))?;
        writeln!(self.out)
    }

    fn request_discount(&mut self, customer: CustomerId) -> io::Result<()> {
        writeln!(self.out, "Requesting discount for customer with id {customer}:")?;
        match self.service.apply_discount(customer) {
            Ok(total) => {
                writeln!(self.out, "Total cost (incl. VAT): {}", self.money(total))?;
                writeln!(self.out)
            }
            Err(e) => {
                writeln!(self.out, "Discount operation failed.")?;
                self.report(&e)
            }
        }
    }

    fn print_item(&mut self, item: &SaleItemSnapshot) -> io::Result<()> {
        writeln!(self.out, "Item ID: {}", item.item_id)?;
        writeln!(self.out, "Item name: {}", item.name)?;
        writeln!(self.out, "Item cost (incl. VAT): {}", self.money(item.final_unit_price))?;
        writeln!(self.out, "VAT: {}", item.vat_rate)?;
        writeln!(self.out, "Item description: {}", item.description)?;
        writeln!(self.out)
    }

    fn report(&mut self, err: &SaleServiceError) -> io::Result<()> {
        writeln!(self.out, "ERROR: {err}")?;
        writeln!(self.out)
    }

    fn money(&self, amount: Amount) -> String {
        format!("{} {}", amount, self.currency)
    }
}

// =============================================================================
// Revenue Display
// =============================================================================

/// Prints the running revenue after every completed payment.
#[derive(Debug)]
pub struct TotalRevenueView {
    total_revenue: Cell<Amount>,
    currency: String,
}

impl TotalRevenueView {
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            total_revenue: Cell::new(Amount::zero()),
            currency: currency.into(),
        }
    }

    pub fn total_revenue(&self) -> Amount {
        self.total_revenue.get()
    }
}

impl RevenueObserver for TotalRevenueView {
    fn payment_received(&self, payment: &CashPayment) {
        let total = self.total_revenue.get() + payment.total_cost();
        self.total_revenue.set(total);
        println!("Total revenue after last sale is: {} {}", total, self.currency);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use kassa_service::integration::{AccountingLedger, InMemoryInventory, UnavailableDiscountService};
    use kassa_service::{CheckoutConfig, Collaborators, ReceiptSink};
    use std::rc::Rc;

    struct SilentReceipts;

    impl ReceiptSink for SilentReceipts {
        fn print_receipt(&self, _receipt: &str) {}
    }

    fn view() -> (View<Vec<u8>>, Rc<AccountingLedger>) {
        let accounting = Rc::new(AccountingLedger::new());
        let collaborators = Collaborators {
            inventory: Rc::new(InMemoryInventory::with_sample_catalog().unwrap()),
            discounts: Rc::new(UnavailableDiscountService),
            accounting: accounting.clone(),
            receipts: Rc::new(SilentReceipts),
        };
        let service = SaleService::new(collaborators, &CheckoutConfig::default());
        (View::with_writer(service, "SEK", Vec::new()), accounting)
    }

    #[test]
    fn test_sample_run_completes_both_sales() {
        let (mut view, accounting) = view();
        view.sample_run().unwrap();

        assert_eq!(accounting.recorded_sales().len(), 2);
        assert_eq!(accounting.total_revenue(), "1021.22".parse().unwrap());
        assert_eq!(view.service().cash_register_balance(), "2021.22".parse().unwrap());
        assert!(view.service().current_sale().is_none());
    }

    #[test]
    fn test_sample_run_output() {
        let (mut view, _) = view();
        view.sample_run().unwrap();
        let text = String::from_utf8(view.into_writer()).unwrap();

        assert!(text.contains("Add 1 item with id 10101:\nERROR: Item 10101 not found in inventory\n"));
        assert!(text.contains("Item name: Coffee 500g\n"));
        assert!(text.contains("Item cost (incl. VAT): 122.44 SEK\n"));
        assert!(text.contains("VAT: 25%\n"));
        assert!(text.contains("Total cost (incl. VAT): 367.32 SEK\n"));
        assert!(text.contains("End sale:\nTotal cost (incl. VAT): 870.20 SEK\n"));
        assert!(text.contains("Requesting discount for customer with id 1:\nDiscount operation failed.\n"));
        assert!(text.contains("Change to give the customer: 129.80 SEK\n"));
        assert!(text.contains("Change to give the customer: 848.98 SEK\n"));
    }

    #[test]
    fn test_revenue_view_keeps_running_total() {
        let view = TotalRevenueView::new("SEK");
        view.payment_received(&CashPayment::new("870.20".parse().unwrap(), Amount::from_units(1000)));
        view.payment_received(&CashPayment::new("151.02".parse().unwrap(), Amount::from_units(1000)));
        assert_eq!(view.total_revenue(), "1021.22".parse().unwrap());
    }
}
