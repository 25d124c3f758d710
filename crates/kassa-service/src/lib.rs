//! # kassa-service: Register Orchestration for Kassa POS
//!
//! Runs the sale aggregate from `kassa-core` for one register and connects it
//! to inventory, discounts, accounting, receipts and revenue reporting.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          kassa-service                                  │
//! │                                                                         │
//! │   ┌───────────────┐        ┌──────────────────────────────────────┐     │
//! │   │  SaleService  │───────►│  ports (traits)                      │     │
//! │   │  one active   │        │  InventoryLookup  DiscountService    │     │
//! │   │  Sale         │        │  AccountingRecorder  ReceiptSink     │     │
//! │   └──────┬────────┘        │  RevenueObserver                     │     │
//! │          │                 └──────────────────┬───────────────────┘     │
//! │   ┌──────▼─────────┐                          │ implemented by          │
//! │   │ PaymentService │       ┌──────────────────▼───────────────────┐     │
//! │   │ drawer+receipt │       │  integration                         │     │
//! │   └────────────────┘       │  InMemoryInventory, AccountingLedger │     │
//! │                            │  UnavailableDiscountService, ...     │     │
//! │                            └──────────────────────────────────────┘     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`sale_service`] - The controller
//! - [`payment_service`] - Cash drawer and receipt printing
//! - [`ports`] - Collaborator traits
//! - [`integration`] - In-process collaborator implementations
//! - [`config`] - Layered configuration
//! - [`error`] - Service error types

pub mod config;
pub mod error;
pub mod integration;
pub mod payment_service;
pub mod ports;
pub mod sale_service;

pub use config::CheckoutConfig;
pub use error::{
    ConfigError, FailureCause, ItemNotFoundError, SaleServiceError, SaleServiceResult,
    ServiceOperation, ServiceUnavailableError,
};
pub use payment_service::PaymentService;
pub use ports::{AccountingRecorder, DiscountService, InventoryLookup, ReceiptSink, RevenueObserver};
pub use sale_service::{Collaborators, SaleService};
