//! # Cash Register
//!
//! Tracks how much cash sits in the drawer.
//!
//! ```text
//! opening balance 1000.00
//!   + paid         1000.00   (customer hands over cash)
//!   - change        510.20   (cashier hands back change)
//!   = balance      1489.80
//! ```

use crate::amount::Amount;
use crate::payment::CashPayment;

/// The drawer balance of one register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CashRegister {
    balance: Amount,
}

impl CashRegister {
    /// Opens the drawer with `opening_balance` in it.
    pub fn new(opening_balance: Amount) -> Self {
        Self {
            balance: opening_balance,
        }
    }

    /// Puts the tendered cash into the drawer.
    pub fn add_payment(&mut self, payment: &CashPayment) {
        self.balance += payment.paid_amount();
    }

    /// Takes the change for `payment` out of the drawer.
    pub fn dispense_change(&mut self, payment: &CashPayment) {
        self.balance -= payment.change();
    }

    /// Handles a completed payment: cash in, change out.
    ///
    /// ## Example
    /// ```rust
    /// use kassa_core::{Amount, CashPayment, CashRegister};
    ///
    /// let mut register = CashRegister::new(Amount::from_units(1000));
    /// let payment = CashPayment::new("44.68".parse().unwrap(), Amount::from_units(50));
    /// register.register_payment(&payment);
    ///
    /// assert_eq!(register.balance().to_string(), "1044.68");
    /// ```
    pub fn register_payment(&mut self, payment: &CashPayment) {
        self.add_payment(payment);
        self.dispense_change(payment);
    }

    #[inline]
    pub fn balance(&self) -> Amount {
        self.balance
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn amount(s: &str) -> Amount {
        s.parse().unwrap()
    }

    #[test]
    fn test_balance_grows_by_sale_total() {
        let mut register = CashRegister::new(amount("1000.00"));
        let payment = CashPayment::new(amount("489.80"), amount("1000.00"));

        register.register_payment(&payment);

        assert_eq!(register.balance(), amount("1489.80"));
    }

    #[test]
    fn test_add_and_dispense_separately() {
        let mut register = CashRegister::new(Amount::zero());
        let payment = CashPayment::new(amount("44.68"), amount("50.00"));

        register.add_payment(&payment);
        assert_eq!(register.balance(), amount("50.00"));

        register.dispense_change(&payment);
        assert_eq!(register.balance(), amount("44.68"));
    }
}
