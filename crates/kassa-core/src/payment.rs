//! # Cash Payment
//!
//! The settled payment of a sale and the change it produces.
//!
//! ```text
//! total_cost  44.68
//! paid_amount 50.00
//!             ─────
//! change       5.32   = paid_amount - total_cost
//! ```
//!
//! Change is allowed to be negative here. Refusing short tenders is a policy
//! of the register (see `kassa-service`), not of the value itself.

use serde::{Deserialize, Serialize};

use crate::amount::Amount;

/// A cash payment. Immutable after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CashPayment {
    total_cost: Amount,
    paid_amount: Amount,
    change: Amount,
}

impl CashPayment {
    /// Creates a payment and derives the change.
    ///
    /// ## Example
    /// ```rust
    /// use kassa_core::CashPayment;
    ///
    /// let payment = CashPayment::new("44.68".parse().unwrap(), "50".parse().unwrap());
    /// assert_eq!(payment.change().to_string(), "5.32");
    /// ```
    pub fn new(total_cost: Amount, paid_amount: Amount) -> Self {
        Self {
            total_cost,
            paid_amount,
            change: paid_amount - total_cost,
        }
    }

    #[inline]
    pub fn total_cost(&self) -> Amount {
        self.total_cost
    }

    #[inline]
    pub fn paid_amount(&self) -> Amount {
        self.paid_amount
    }

    #[inline]
    pub fn change(&self) -> Amount {
        self.change
    }

    /// True when the tender covers the total.
    pub fn covers_total(&self) -> bool {
        !self.change.is_negative()
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
    fn test_change_is_paid_minus_total() {
        let payment = CashPayment::new(amount("489.80"), amount("1000"));
        assert_eq!(payment.change(), amount("510.20"));
        assert!(payment.covers_total());
    }

    #[test]
    fn test_negative_change_is_kept() {
        let payment = CashPayment::new(amount("44.68"), amount("40.00"));
        assert_eq!(payment.change(), amount("-4.68"));
        assert!(!payment.covers_total());
    }

    #[test]
    fn test_exact_tender_gives_zero_change() {
        let payment = CashPayment::new(amount("44.68"), amount("44.68"));
        assert!(payment.change().is_zero());
        assert!(payment.covers_total());
    }

    #[test]
    fn test_structural_equality() {
        let a = CashPayment::new(amount("10.0"), amount("20"));
        let b = CashPayment::new(amount("10.00"), amount("20.00"));
        assert_eq!(a, b);
        assert_ne!(a, CashPayment::new(amount("10.00"), amount("25.00")));
    }
}
