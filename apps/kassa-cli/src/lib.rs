//! # Kassa Register Process
//!
//! Wires configuration, logging and the in-process collaborators together
//! and runs the console session.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  run()                                                          │
//! │                                                                 │
//! │  1. CheckoutConfig::load     defaults < kassa.toml < KASSA_*    │
//! │  2. build_log_dispatch       logs/kassa-YYYY-MM-DD.log          │
//! │  3. collaborators            inventory, discounts, accounting,  │
//! │                              console receipts                   │
//! │  4. revenue observers        revenue.log + console total        │
//! │  5. View::sample_run         two scripted sales                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Steps 2 to 5 run under the register's dispatcher, so nothing is logged to
//! the terminal. A revenue log that cannot be opened stops the register.

pub mod error;
pub mod logging;
pub mod view;

use std::rc::Rc;

use kassa_service::integration::{
    AccountingLedger, ConsoleReceiptPrinter, InMemoryInventory, TotalRevenueFileOutput,
    UnavailableDiscountService,
};
use kassa_service::{CheckoutConfig, Collaborators, SaleService};
use tracing::info;

pub use error::StartupError;
pub use view::{TotalRevenueView, View};

/// Starts the register with configuration from the usual places.
pub fn run() -> Result<(), StartupError> {
    let config = CheckoutConfig::load(None)?;
    let dispatch = logging::build_log_dispatch(&config)?;

    tracing::dispatcher::with_default(&dispatch, || -> Result<(), StartupError> {
        info!(
            store = %config.store_name,
            version = env!("CARGO_PKG_VERSION"),
            "Starting Kassa register"
        );

        let service = build_service(&config)?.with_log_dispatch(dispatch.clone());

        let mut view = View::new(service, config.currency.as_str());
        view.sample_run()?;

        info!(balance = %view.service().cash_register_balance(), "Register closed");
        Ok(())
    })
}

/// Builds a [`SaleService`] with the demo collaborators and both revenue
/// observers attached.
pub fn build_service(config: &CheckoutConfig) -> Result<SaleService, StartupError> {
    let inventory = InMemoryInventory::with_sample_catalog()?;

    let revenue_log_path = config.revenue_log_path();
    let revenue_log = TotalRevenueFileOutput::create(&revenue_log_path).map_err(|source| {
        StartupError::RevenueLog {
            path: revenue_log_path.clone(),
            source,
        }
    })?;

    let collaborators = Collaborators {
        inventory: Rc::new(inventory),
        discounts: Rc::new(UnavailableDiscountService),
        accounting: Rc::new(AccountingLedger::new()),
        receipts: Rc::new(ConsoleReceiptPrinter),
    };

    let mut service = SaleService::new(collaborators, config);
    service.add_revenue_observer(Rc::new(revenue_log));
    service.add_revenue_observer(Rc::new(TotalRevenueView::new(config.currency.as_str())));
    Ok(service)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn config_in(dir: &std::path::Path) -> CheckoutConfig {
        CheckoutConfig {
            log_dir: dir.to_path_buf(),
            ..CheckoutConfig::default()
        }
    }

    #[test]
    fn test_build_service_creates_revenue_log() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir.path().join("logs"));

        let service = build_service(&config).unwrap();

        assert!(config.revenue_log_path().exists());
        assert_eq!(service.cash_register_balance(), config.opening_balance);
    }

    #[test]
    fn test_unwritable_revenue_log_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        // A directory where the log file should be.
        config.revenue_log = "occupied".to_string();
        std::fs::create_dir(dir.path().join("occupied")).unwrap();

        let result = build_service(&config);

        assert!(matches!(result, Err(StartupError::RevenueLog { .. })));
    }
}
