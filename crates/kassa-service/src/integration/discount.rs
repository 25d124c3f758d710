//! Discount service stand-in.

use kassa_core::{Discount, DiscountRequest};
use tracing::warn;

use crate::error::ServiceUnavailableError;
use crate::ports::DiscountService;

/// A discount database that is never reachable.
///
/// Every request fails with [`ServiceUnavailableError`]. A real discount
/// service plugs in through [`DiscountService`].
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableDiscountService;

impl DiscountService for UnavailableDiscountService {
    fn get_discount(&self, request: &DiscountRequest) -> Result<Discount, ServiceUnavailableError> {
        warn!(customer_id = %request.customer_id, "Discount database unavailable");
        Err(ServiceUnavailableError::new(
            "Discount database",
            "Discount database is unavailable.",
        ))
    }
}
