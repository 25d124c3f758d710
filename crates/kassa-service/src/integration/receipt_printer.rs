//! Console receipt printer.

use crate::ports::ReceiptSink;

/// Prints receipts to standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReceiptPrinter;

impl ReceiptSink for ConsoleReceiptPrinter {
    fn print_receipt(&self, receipt: &str) {
        println!("{receipt}");
    }
}
