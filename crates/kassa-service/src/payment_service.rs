//! # Payment Service
//!
//! Everything that happens at the register once a payment is on the sale:
//! the drawer is updated and the receipt is printed.

use std::rc::Rc;

use kassa_core::{Amount, CashPayment, CashRegister, Receipt, SaleSnapshot};
use tracing::info;

use crate::ports::ReceiptSink;

/// Owns the cash register and the receipt sink.
pub struct PaymentService {
    register: CashRegister,
    receipts: Rc<dyn ReceiptSink>,
    currency: String,
}

impl PaymentService {
    pub fn new(opening_balance: Amount, receipts: Rc<dyn ReceiptSink>, currency: impl Into<String>) -> Self {
        Self {
            register: CashRegister::new(opening_balance),
            receipts,
            currency: currency.into(),
        }
    }

    /// Puts the cash in the drawer, takes the change out and prints the receipt.
    pub fn process_payment(&mut self, sale: &SaleSnapshot, payment: &CashPayment) {
        self.register.register_payment(payment);

        let receipt = Receipt::new(sale.clone(), *payment, self.currency.as_str());
        self.receipts.print_receipt(&receipt.to_string());

        info!(
            sale_id = %sale.sale_id,
            paid = %payment.paid_amount(),
            change = %payment.change(),
            balance = %self.register.balance(),
            "Payment registered"
        );
    }

    /// Cash currently in the drawer.
    pub fn balance(&self) -> Amount {
        self.register.balance()
    }
}
