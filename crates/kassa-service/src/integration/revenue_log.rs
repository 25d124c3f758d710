//! Revenue log file.
//!
//! One line per completed payment:
//! ```text
//! [2025-05-14 10:32:07] NEW_REVENUE: totalRevenue=870.20 | saleCost=870.20 | paid=1000.00 | change=129.80
//! ```

use std::cell::{Cell, RefCell};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use chrono::Local;
use kassa_core::{Amount, CashPayment};
use tracing::{debug, error};

use crate::ports::RevenueObserver;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Revenue observer that appends the running total to a log.
#[derive(Debug)]
pub struct TotalRevenueFileOutput<W: Write = File> {
    writer: RefCell<W>,
    total_revenue: Cell<Amount>,
}

impl TotalRevenueFileOutput<File> {
    /// Opens (or creates) the log at `path` for appending.
    ///
    /// The register cannot run without its revenue log, so callers treat an
    /// error here as fatal.
    pub fn create(path: &Path) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        debug!(?path, "Revenue log opened");
        Ok(Self::new(file))
    }
}

impl<W: Write> TotalRevenueFileOutput<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: RefCell::new(writer),
            total_revenue: Cell::new(Amount::zero()),
        }
    }

    /// Revenue over all payments seen by this observer.
    pub fn total_revenue(&self) -> Amount {
        self.total_revenue.get()
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn write_line(&self, payment: &CashPayment) -> io::Result<()> {
        let mut writer = self.writer.borrow_mut();
        writeln!(
            writer,
            "[{}] NEW_REVENUE: totalRevenue={} | saleCost={} | paid={} | change={}",
            Local::now().format(TIME_FORMAT),
            self.total_revenue.get(),
            payment.total_cost(),
            payment.paid_amount(),
            payment.change()
        )?;
        writer.flush()
    }
}

impl<W: Write> RevenueObserver for TotalRevenueFileOutput<W> {
    fn payment_received(&self, payment: &CashPayment) {
        self.total_revenue
            .set(self.total_revenue.get() + payment.total_cost());

        if let Err(e) = self.write_line(payment) {
            error!(error = %e, "Failed to write revenue log");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amount(s: &str) -> Amount {
        s.parse().unwrap()
    }

    #[test]
    fn test_lines_carry_running_total() {
        let output = TotalRevenueFileOutput::new(Vec::new());

        output.payment_received(&CashPayment::new(amount("870.20"), amount("1000")));
        output.payment_received(&CashPayment::new(amount("151.02"), amount("1000")));

        assert_eq!(output.total_revenue(), amount("1021.22"));

        let text = String::from_utf8(output.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('['));
        assert!(lines[0].ends_with(
            "] NEW_REVENUE: totalRevenue=870.20 | saleCost=870.20 | paid=1000.00 | change=129.80"
        ));
        assert!(lines[1].ends_with(
            "] NEW_REVENUE: totalRevenue=1021.22 | saleCost=151.02 | paid=1000.00 | change=848.98"
        ));
    }

    #[test]
    fn test_create_appends_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("revenue.log");

        let output = TotalRevenueFileOutput::create(&path).unwrap();
        output.payment_received(&CashPayment::new(amount("10"), amount("20")));
        drop(output);

        let output = TotalRevenueFileOutput::create(&path).unwrap();
        output.payment_received(&CashPayment::new(amount("10"), amount("20")));
        drop(output);

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2);
    }
}
