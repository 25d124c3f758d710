//! # Sale Service
//!
//! The register's controller: owns the one active sale and sequences the
//! collaborators around it.
//!
//! ## Control Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  start_sale ───► new Sale (fails if one is already active)              │
//! │                                                                         │
//! │  add_item(id, qty)                                                      │
//! │     ├── id already in sale ──► Sale::increase_quantity                  │
//! │     └── otherwise ───────────► InventoryLookup::get_item_info           │
//! │                                   └──► Sale::add_item                   │
//! │                                                                         │
//! │  end_sale ───► Sale::end                                                │
//! │                                                                         │
//! │  apply_discount(customer) ───► DiscountService::get_discount            │
//! │                                   └──► Sale::apply_discount             │
//! │                                                                         │
//! │  process_cash_payment(paid)                                             │
//! │     Sale::ensure_awaiting_payment                                       │
//! │     CashPayment::new(total, paid)                                       │
//! │     Sale::record_payment                                                │
//! │     PaymentService (drawer + receipt)                                   │
//! │     InventoryLookup::update_inventory                                   │
//! │     AccountingRecorder::record_sale                                     │
//! │     RevenueObserver::payment_received  (each, in registration order)    │
//! │     active sale released                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Threading
//! One cashier, one thread. Collaborators are held as `Rc<dyn ...>`, which
//! makes `SaleService` neither `Send` nor `Sync`: sharing one service between
//! threads does not compile rather than racing on the active sale.
//!
//! ## No Rollback
//! Once `Sale::record_payment` succeeds the sale is paid. The calls that
//! follow (receipt, inventory, accounting, observers) are not undone if one
//! of them misbehaves.

use std::rc::Rc;

use kassa_core::validation::{validate_quantity, validate_tendered_amount};
use kassa_core::{
    Amount, CashPayment, CoreError, CustomerId, ItemId, Sale, SaleId, SaleSnapshot,
};
use tracing::{debug, error, info, warn, Dispatch};

use crate::config::CheckoutConfig;
use crate::error::{FailureCause, SaleServiceError, SaleServiceResult, ServiceOperation};
use crate::payment_service::PaymentService;
use crate::ports::{AccountingRecorder, DiscountService, InventoryLookup, ReceiptSink, RevenueObserver};

// =============================================================================
// Collaborators
// =============================================================================

/// The outside world, as seen by the sale service.
#[derive(Clone)]
pub struct Collaborators {
    pub inventory: Rc<dyn InventoryLookup>,
    pub discounts: Rc<dyn DiscountService>,
    pub accounting: Rc<dyn AccountingRecorder>,
    pub receipts: Rc<dyn ReceiptSink>,
}

// =============================================================================
// Sale Service
// =============================================================================

/// Application controller for one register.
pub struct SaleService {
    inventory: Rc<dyn InventoryLookup>,
    discounts: Rc<dyn DiscountService>,
    accounting: Rc<dyn AccountingRecorder>,
    payments: PaymentService,
    observers: Vec<Rc<dyn RevenueObserver>>,
    current_sale: Option<Sale>,
    log_dispatch: Option<Dispatch>,
}

impl SaleService {
    pub fn new(collaborators: Collaborators, config: &CheckoutConfig) -> Self {
        Self {
            inventory: collaborators.inventory,
            discounts: collaborators.discounts,
            accounting: collaborators.accounting,
            payments: PaymentService::new(
                config.opening_balance,
                collaborators.receipts,
                config.currency.as_str(),
            ),
            observers: Vec::new(),
            current_sale: None,
            log_dispatch: None,
        }
    }

    /// Sends this service's log events to `dispatch` instead of whatever
    /// subscriber is current on the calling thread.
    pub fn with_log_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.log_dispatch = Some(dispatch);
        self
    }

    /// Registers an observer for completed payments.
    pub fn add_revenue_observer(&mut self, observer: Rc<dyn RevenueObserver>) {
        self.observers.push(observer);
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Starts a new sale.
    ///
    /// ## Errors
    /// - `OperationFailed(SaleAlreadyActive)` if a sale is in progress
    pub fn start_sale(&mut self) -> SaleServiceResult<SaleId> {
        self.run(ServiceOperation::StartSale, |service| {
            debug!("start_sale");

            if service.current_sale.is_some() {
                return Err(SaleServiceError::operation_failed(
                    ServiceOperation::StartSale,
                    FailureCause::SaleAlreadyActive,
                ));
            }

            let sale = Sale::start();
            let sale_id = sale.id();
            service.current_sale = Some(sale);

            info!(sale_id = %sale_id, "Sale started");
            Ok(sale_id)
        })
    }

    /// Closes item registration and returns the total to pay.
    pub fn end_sale(&mut self) -> SaleServiceResult<Amount> {
        self.run(ServiceOperation::EndSale, |service| {
            debug!("end_sale");
            let operation = ServiceOperation::EndSale;
            let sale = active_sale(&mut service.current_sale, operation)?;

            sale.end()
                .map_err(|e| SaleServiceError::operation_failed(operation, e))?;

            info!(sale_id = %sale.id(), total = %sale.total_cost(), vat = %sale.total_vat(), "Sale ended");
            Ok(sale.total_cost())
        })
    }

    /// Abandons the active sale.
    pub fn cancel_sale(&mut self) -> SaleServiceResult<()> {
        self.run(ServiceOperation::CancelSale, |service| {
            debug!("cancel_sale");
            let operation = ServiceOperation::CancelSale;
            let sale = active_sale(&mut service.current_sale, operation)?;

            sale.cancel()
                .map_err(|e| SaleServiceError::operation_failed(operation, e))?;

            info!(sale_id = %sale.id(), "Sale cancelled");
            service.current_sale = None;
            Ok(())
        })
    }

    /// Adds `quantity` units of an item and returns the updated sale.
    ///
    /// ## Errors
    /// - `OperationFailed` without an active sale, or after the sale ended
    /// - `Validation` for a quantity outside `1..=MAX_ITEM_QUANTITY`
    /// - `ItemNotFound` if the inventory does not know the id; the sale is
    ///   left untouched
    pub fn add_item(&mut self, item_id: ItemId, quantity: i64) -> SaleServiceResult<SaleSnapshot> {
        self.run(ServiceOperation::AddItem, |service| {
            debug!(item_id = %item_id, quantity, "add_item");
            let operation = ServiceOperation::AddItem;
            let sale = active_sale(&mut service.current_sale, operation)?;
            validate_quantity(quantity)?;

            if sale.contains_item(item_id) {
                sale.increase_quantity(item_id, quantity)
                    .map_err(|e| core_failure(operation, e))?;
            } else {
                let info = service.inventory.get_item_info(item_id)?;
                sale.add_item(info, quantity)
                    .map_err(|e| SaleServiceError::operation_failed(operation, e))?;
            }

            info!(
                sale_id = %sale.id(),
                item_id = %item_id,
                quantity,
                total = %sale.total_cost(),
                "Item registered"
            );
            Ok(sale.snapshot())
        })
    }

    /// Asks the discount service for a discount for `customer_id` and returns
    /// the resulting total.
    ///
    /// A failing discount service leaves the sale waiting for payment; the
    /// error is retryable.
    pub fn apply_discount(&mut self, customer_id: CustomerId) -> SaleServiceResult<Amount> {
        self.run(ServiceOperation::ApplyDiscount, |service| {
            debug!(customer_id = %customer_id, "apply_discount");
            let operation = ServiceOperation::ApplyDiscount;
            let sale = active_sale(&mut service.current_sale, operation)?;

            sale.ensure_awaiting_payment()
                .map_err(|e| SaleServiceError::operation_failed(operation, e))?;

            let request = sale.discount_request(customer_id);
            let discount = service
                .discounts
                .get_discount(&request)
                .map_err(|e| SaleServiceError::operation_failed(operation, e))?;

            sale.apply_discount(&discount)
                .map_err(|e| SaleServiceError::operation_failed(operation, e))?;

            info!(sale_id = %sale.id(), customer_id = %customer_id, total = %sale.total_cost(), "Discount applied");
            Ok(sale.total_cost())
        })
    }

    /// Settles the active sale with `paid_amount` in cash and returns the change.
    ///
    /// ## Errors
    /// - `OperationFailed` without an active sale, or before the sale ended
    /// - `Validation` for a zero or negative tender, or one above
    ///   `MAX_AMOUNT_UNITS`
    /// - `OperationFailed(InsufficientPayment)` if the tender is below the
    ///   total; the sale stays payable
    pub fn process_cash_payment(&mut self, paid_amount: Amount) -> SaleServiceResult<Amount> {
        self.run(ServiceOperation::Payment, |service| {
            debug!(paid = %paid_amount, "process_cash_payment");
            let operation = ServiceOperation::Payment;
            let sale = active_sale(&mut service.current_sale, operation)?;

            sale.ensure_awaiting_payment()
                .map_err(|e| SaleServiceError::operation_failed(operation, e))?;
            validate_tendered_amount(paid_amount)?;

            let payment = CashPayment::new(sale.total_cost(), paid_amount);
            if !payment.covers_total() {
                return Err(SaleServiceError::operation_failed(
                    operation,
                    FailureCause::InsufficientPayment {
                        total: payment.total_cost(),
                        paid: paid_amount,
                    },
                ));
            }

            sale.record_payment(payment)
                .map_err(|e| SaleServiceError::operation_failed(operation, e))?;
            let snapshot = sale.snapshot();

            service.payments.process_payment(&snapshot, &payment);
            service.inventory.update_inventory(&snapshot);
            service.accounting.record_sale(&snapshot);
            for observer in &service.observers {
                observer.payment_received(&payment);
            }

            service.current_sale = None;
            info!(
                sale_id = %snapshot.sale_id,
                total = %payment.total_cost(),
                change = %payment.change(),
                "Sale completed"
            );
            Ok(payment.change())
        })
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Snapshot of the active sale, if any.
    pub fn current_sale(&self) -> Option<SaleSnapshot> {
        self.current_sale.as_ref().map(Sale::snapshot)
    }

    /// Cash in the drawer.
    pub fn cash_register_balance(&self) -> Amount {
        self.payments.balance()
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Runs `op` inside the injected dispatcher and logs a failure.
    fn run<T>(
        &mut self,
        operation: ServiceOperation,
        op: impl FnOnce(&mut Self) -> SaleServiceResult<T>,
    ) -> SaleServiceResult<T> {
        let dispatch = self.log_dispatch.clone();
        let execute = move || {
            let result = op(self);
            if let Err(e) = &result {
                log_failure(operation, e);
            }
            result
        };

        match dispatch {
            Some(dispatch) => tracing::dispatcher::with_default(&dispatch, execute),
            None => execute(),
        }
    }
}

fn active_sale(
    current: &mut Option<Sale>,
    operation: ServiceOperation,
) -> SaleServiceResult<&mut Sale> {
    current
        .as_mut()
        .ok_or_else(|| SaleServiceError::operation_failed(operation, FailureCause::NoActiveSale))
}

fn core_failure(operation: ServiceOperation, err: CoreError) -> SaleServiceError {
    match err {
        CoreError::ExecutionOrder(e) => SaleServiceError::operation_failed(operation, e),
        // only reachable if the id vanished between the lookup and the call
        CoreError::ItemNotInSale(item_id) => {
            SaleServiceError::ItemNotFound(crate::error::ItemNotFoundError { item_id })
        }
    }
}

fn log_failure(operation: ServiceOperation, err: &SaleServiceError) {
    match err {
        SaleServiceError::OperationFailed { message, cause } => {
            error!(operation = operation.label(), cause = %cause, "{}", message);
        }
        SaleServiceError::ItemNotFound(e) => {
            warn!(item_id = %e.item_id, "Item not found in inventory");
        }
        SaleServiceError::Validation(e) => {
            warn!(operation = operation.label(), error = %e, "Input rejected");
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
