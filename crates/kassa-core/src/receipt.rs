//! # Receipt
//!
//! Fixed-width text layout of a paid sale.
//!
//! ## Layout (56 columns)
//! ```text
//! -------------------- Begin receipt ---------------------
//! Time of Sale: 2025-05-14 10:32:07
//!
//! Coffee 500g                  3 x 122.44       367.32 SEK
//! Tomahawk (900g)              1 x 502.88       502.88 SEK
//!
//! Total:                                        870.20 SEK
//! VAT: 127.35
//!
//! Payment:                                     1000.00 SEK
//! Change:                                       129.80 SEK
//! --------------------- End receipt ----------------------
//! ```
//!
//! Rendering is pure. Printing it somewhere is the job of a receipt sink.

use chrono::Local;
use std::fmt;

use crate::payment::CashPayment;
use crate::snapshot::SaleSnapshot;

const RECEIPT_WIDTH: usize = 56;
const ITEM_QUANTITY_COLUMN: usize = 28;
const AMOUNT_WIDTH: usize = 14;
const SUMMARY_COLUMN: usize = RECEIPT_WIDTH - AMOUNT_WIDTH - 1;
const QUANTITY_WIDTH: usize = RECEIPT_WIDTH - ITEM_QUANTITY_COLUMN - AMOUNT_WIDTH - 2;
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A receipt for one paid sale.
#[derive(Debug, Clone)]
pub struct Receipt {
    sale: SaleSnapshot,
    payment: CashPayment,
    currency: String,
}

impl Receipt {
    pub fn new(sale: SaleSnapshot, payment: CashPayment, currency: impl Into<String>) -> Self {
        Self {
            sale,
            payment,
            currency: currency.into(),
        }
    }

    pub fn sale(&self) -> &SaleSnapshot {
        &self.sale
    }

    pub fn payment(&self) -> &CashPayment {
        &self.payment
    }

    fn rule(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
        let left = (RECEIPT_WIDTH - title.len()) / 2;
        let right = RECEIPT_WIDTH - title.len() - left;
        write!(f, "{}{title}{}", "-".repeat(left), "-".repeat(right))
    }

    fn summary_line(&self, f: &mut fmt::Formatter<'_>, label: &str, value: impl fmt::Display) -> fmt::Result {
        let value = format!("{} {}", value, self.currency);
        writeln!(f, "{label:<SUMMARY_COLUMN$} {value:>AMOUNT_WIDTH$}")
    }
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Self::rule(f, " Begin receipt ")?;
        writeln!(f)?;

        let started = self.sale.started_at.with_timezone(&Local);
        writeln!(f, "Time of Sale: {}", started.format(TIME_FORMAT))?;
        writeln!(f)?;

        for item in &self.sale.items {
            let quantity = format!("{} x {}", item.quantity, item.final_unit_price);
            let total = format!("{} {}", item.final_total_price, self.currency);
            writeln!(
                f,
                "{:<ITEM_QUANTITY_COLUMN$} {:<QUANTITY_WIDTH$} {:>AMOUNT_WIDTH$}",
                item.name, quantity, total
            )?;
        }
        writeln!(f)?;

        self.summary_line(f, "Total:", self.sale.total_cost)?;
        writeln!(f, "VAT: {}", self.sale.total_vat)?;
        writeln!(f)?;

        self.summary_line(f, "Payment:", self.payment.paid_amount())?;
        self.summary_line(f, "Change:", self.payment.change())?;

        Self::rule(f, " End receipt ")
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ItemId, ItemInfo, Percentage};
    use crate::Sale;

    fn paid_receipt() -> Receipt {
        let mut sale = Sale::start();
        sale.add_item(
            ItemInfo::new(
                ItemId::new(10001),
                "Milk 1L",
                "Fresh whole milk, 1 liter",
                "19.95".parse().unwrap(),
                Percentage::new(12),
            ),
            2,
        )
        .unwrap();
        sale.end().unwrap();
        let payment = CashPayment::new(sale.total_cost(), "50".parse().unwrap());
        sale.record_payment(payment).unwrap();

        Receipt::new(sale.snapshot(), payment, "SEK")
    }

    #[test]
    fn test_header_and_footer_rules() {
        let text = paid_receipt().to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "-------------------- Begin receipt ---------------------"
        );
        assert_eq!(
            *lines.last().unwrap(),
            "--------------------- End receipt ----------------------"
        );
        assert_eq!(lines[0].len(), 56);
        assert_eq!(lines.last().unwrap().len(), 56);
        assert!(lines[1].starts_with("Time of Sale: "));
        assert_eq!(lines[1].len(), "Time of Sale: 2025-01-01 00:00:00".len());
    }

    #[test]
    fn test_item_and_summary_lines() {
        let text = paid_receipt().to_string();

        let item_line = text.lines().find(|l| l.starts_with("Milk 1L")).unwrap();
        assert_eq!(
            item_line,
            format!("{:<28} {:<12} {:>14}", "Milk 1L", "2 x 22.34", "44.68 SEK")
        );
        assert_eq!(item_line.len(), 56);

        let total_line = text.lines().find(|l| l.starts_with("Total:")).unwrap();
        assert_eq!(total_line.len(), 56);

        assert!(text.contains(&format!("{:<41} {:>14}\n", "Total:", "44.68 SEK")));
        assert!(text.contains("VAT: 4.78\n"));
        assert!(text.contains(&format!("{:<41} {:>14}\n", "Payment:", "50.00 SEK")));
        assert!(text.contains(&format!("{:<41} {:>14}\n", "Change:", "5.32 SEK")));
    }
}
