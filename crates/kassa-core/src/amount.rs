//! # Amount Module
//!
//! Provides the `Amount` type for handling monetary values safely.
//!
//! ## Why Rounded Decimals?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    19.95 × 1.12 = 22.343999999999998  ❌ WRONG!                         │
//! │                                                                         │
//! │  OUR SOLUTION: Exact decimals, rounded after EVERY operation            │
//! │    19.95 × 1.12 = 22.3440 → 22.34 (half-up, 2 places)                   │
//! │                                                                         │
//! │  Rounding once per operation (never deferred) means a sequence of      │
//! │  operations always walks the same rounding path, so totals built up    │
//! │  line by line are reproducible to the cent.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kassa_core::{Amount, Percentage};
//!
//! let net: Amount = "19.95".parse().unwrap();
//! let gross = net.increase_by(Percentage::new(12));
//! assert_eq!(gross.to_string(), "22.34");
//!
//! let line = gross.multiply_by_quantity(2);
//! assert_eq!(line, "44.68".parse().unwrap());
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use crate::error::ValidationError;
use crate::types::Percentage;

/// Number of fractional digits every amount is stored with.
pub const DECIMAL_PLACES: u32 = 2;

/// Largest magnitude, in whole currency units, accepted from outside.
///
/// Parsed and validated amounts stay within `±MAX_AMOUNT_UNITS`. A line of
/// `MAX_ITEM_QUANTITY` such items, or a drawer holding billions of them, is
/// still far inside the 96-bit range of `Decimal`, so arithmetic on accepted
/// amounts cannot overflow.
pub const MAX_AMOUNT_UNITS: i64 = 1_000_000_000_000;

/// Half-up rounding for money: 0.005 → 0.01, -0.005 → -0.01.
const ROUNDING: RoundingStrategy = RoundingStrategy::MidpointAwayFromZero;

// =============================================================================
// Amount Type
// =============================================================================

/// An immutable monetary value, always held at exactly two decimal places.
///
/// ## Design Decisions
/// - **Decimal, not cents**: VAT factors like `1.12` multiply exactly, and the
///   rounding step is explicit instead of hidden in integer division
/// - **Signed**: change can be negative when a tender falls short
/// - **Value equality**: `1.50` and `1.5` are the same amount, and hash the same
///
/// ## Where Amount is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  ItemInfo.net_price ──► increase_by(VAT) ──► SaleItem.final_unit_price  │
/// │                                                     │                   │
/// │                          multiply_by_quantity(qty) ◄┘                   │
/// │                                     │                                   │
/// │  Sale.total_cost / Sale.total_vat ◄─┘                                   │
/// │                                     │                                   │
/// │  CashPayment { total_cost, paid_amount, change = paid - total }         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Amount(Decimal);

impl Amount {
    /// Creates an amount from a decimal, rounding half-up to two places.
    ///
    /// ## Example
    /// ```rust
    /// use kassa_core::Amount;
    /// use rust_decimal::Decimal;
    ///
    /// let amount = Amount::new(Decimal::new(22344, 3)); // 22.344
    /// assert_eq!(amount.to_string(), "22.34");
    /// ```
    pub fn new(value: Decimal) -> Self {
        let mut rounded = value.round_dp_with_strategy(DECIMAL_PLACES, ROUNDING);
        rounded.rescale(DECIMAL_PLACES);
        if rounded.is_zero() {
            // -0.004 rounds to zero; never display "-0.00"
            rounded.set_sign_positive(true);
        }
        Amount(rounded)
    }

    /// Creates an amount from untrusted input, rejecting values beyond
    /// `±MAX_AMOUNT_UNITS`.
    ///
    /// ## Example
    /// ```rust
    /// use kassa_core::Amount;
    /// use rust_decimal::Decimal;
    ///
    /// assert!(Amount::try_new(Decimal::new(1999, 2)).is_ok());
    /// assert!(Amount::try_new(Decimal::MAX).is_err());
    /// ```
    pub fn try_new(value: Decimal) -> Result<Self, ValidationError> {
        if value.abs() > Decimal::from(MAX_AMOUNT_UNITS) {
            return Err(ValidationError::OutOfRange {
                field: "amount".to_string(),
                min: -MAX_AMOUNT_UNITS,
                max: MAX_AMOUNT_UNITS,
            });
        }
        Ok(Amount::new(value))
    }

    /// Whether the amount lies within `±MAX_AMOUNT_UNITS`.
    pub fn is_within_limit(&self) -> bool {
        self.0.abs() <= Decimal::from(MAX_AMOUNT_UNITS)
    }

    /// Creates an amount from a whole number of currency units.
    ///
    /// ## Example
    /// ```rust
    /// use kassa_core::Amount;
    ///
    /// assert_eq!(Amount::from_units(1000).to_string(), "1000.00");
    /// ```
    pub fn from_units(units: i64) -> Self {
        Amount::new(Decimal::from(units))
    }

    /// Returns a zero amount (`0.00`).
    #[inline]
    pub fn zero() -> Self {
        Amount::new(Decimal::ZERO)
    }

    /// Returns the underlying decimal value (always scale 2).
    #[inline]
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// Returns the difference `self - other`.
    ///
    /// Same as the `-` operator; kept as a named operation so call sites that
    /// read like the domain language ("paid amount subtract total cost") can
    /// say so.
    #[inline]
    pub fn subtract(self, other: Amount) -> Self {
        self - other
    }

    /// Multiplies the amount by a quantity, rounding the product.
    ///
    /// ## Example
    /// ```rust
    /// use kassa_core::Amount;
    ///
    /// let unit: Amount = "22.34".parse().unwrap();
    /// assert_eq!(unit.multiply_by_quantity(3).to_string(), "67.02");
    /// ```
    pub fn multiply_by_quantity(&self, quantity: i64) -> Self {
        Amount::new(self.0 * Decimal::from(quantity))
    }

    /// Increases the amount by a percentage: `amount × (1 + pct/100)`.
    ///
    /// This is how VAT is added to a net price everywhere in the system.
    ///
    /// ## User Workflow
    /// ```text
    /// Milk 1L: net 19.95, VAT 12%
    ///      │
    ///      ▼
    /// increase_by(12%) ← THIS FUNCTION
    ///      │   19.95 × 1.12 = 22.344
    ///      ▼
    /// Price incl. VAT: 22.34
    /// ```
    pub fn increase_by(&self, percentage: Percentage) -> Self {
        Amount::new(self.0 * (Decimal::ONE + percentage.fraction()))
    }

    /// Decreases the amount by a percentage: `amount × (1 - pct/100)`.
    ///
    /// ## Example
    /// ```rust
    /// use kassa_core::{Amount, Percentage};
    ///
    /// let price: Amount = "100.00".parse().unwrap();
    /// assert_eq!(price.decrease_by(Percentage::new(25)).to_string(), "75.00");
    /// ```
    pub fn decrease_by(&self, percentage: Percentage) -> Self {
        Amount::new(self.0 * (Decimal::ONE - percentage.fraction()))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the plain two-decimal value, e.g. `44.68`.
///
/// Currency symbols are a presentation concern (receipts, views).
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Parses a plain decimal string such as `"19.95"`, `"-3.1"` or `"1000.0"`.
///
/// Only an optional sign, digits and at most one decimal point are accepted:
/// no digit separators, no exponents. Values beyond `±MAX_AMOUNT_UNITS` are
/// rejected.
///
/// ## Example
/// ```rust
/// use kassa_core::Amount;
///
/// assert!("19.95".parse::<Amount>().is_ok());
/// assert!("19,95".parse::<Amount>().is_err());
/// assert!("1_000".parse::<Amount>().is_err());
/// assert!("".parse::<Amount>().is_err());
/// ```
impl FromStr for Amount {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Required {
                field: "amount".to_string(),
            });
        }

        let invalid = |detail: String| ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: format!("'{}' is not a decimal number ({})", trimmed, detail),
        };

        if !is_plain_decimal(trimmed) {
            return Err(invalid("expected digits with an optional sign and decimal point".to_string()));
        }

        let value = Decimal::from_str(trimmed).map_err(|e| invalid(e.to_string()))?;
        Amount::try_new(value)
    }
}

/// `[+-]?digits[.digits]`
fn is_plain_decimal(s: &str) -> bool {
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());

    match unsigned.split_once('.') {
        Some((whole, fraction)) => all_digits(whole) && all_digits(fraction),
        None => all_digits(unsigned),
    }
}

impl TryFrom<String> for Amount {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Amount> for String {
    fn from(amount: Amount) -> Self {
        amount.to_string()
    }
}

/// Default amount is zero.
impl Default for Amount {
    fn default() -> Self {
        Amount::zero()
    }
}

/// Addition of two amounts.
impl Add for Amount {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Amount::new(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Amount {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

/// Subtraction of two amounts.
impl Sub for Amount {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Amount::new(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Amount {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Amount {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Amount::new(-self.0)
    }
}

impl std::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::zero(), |acc, a| acc + a)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashSet;

    fn amount(s: &str) -> Amount {
        s.parse().unwrap()
    }

    #[test]
    fn test_equality_ignores_trailing_zeros() {
        assert_eq!(amount("1.50"), amount("1.5"));
        assert_eq!(amount("1000.0"), Amount::from_units(1000));

        let mut set = HashSet::new();
        set.insert(amount("1.50"));
        assert!(set.contains(&amount("1.5")));
    }

    #[test]
    fn test_always_two_decimal_places() {
        assert_eq!(amount("5").to_string(), "5.00");
        assert_eq!(amount("1.5").to_string(), "1.50");
        assert_eq!(Amount::zero().to_string(), "0.00");
        assert_eq!(amount("-3.1").to_string(), "-3.10");
    }

    #[test]
    fn test_rounds_half_up() {
        assert_eq!(Amount::new(dec!(0.005)).value(), dec!(0.01));
        assert_eq!(Amount::new(dec!(0.004)).value(), dec!(0.00));
        assert_eq!(Amount::new(dec!(-0.005)).value(), dec!(-0.01));
        assert_eq!(Amount::new(dec!(2.675)).value(), dec!(2.68));
    }

    #[test]
    fn test_negative_zero_is_displayed_as_zero() {
        let tiny = Amount::new(dec!(-0.001));
        assert!(tiny.is_zero());
        assert!(!tiny.is_negative());
        assert_eq!(tiny.to_string(), "0.00");
    }

    #[test]
    fn test_rejects_malformed_input() {
        assert!(matches!(
            "".parse::<Amount>(),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            "12,50".parse::<Amount>(),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!("abc".parse::<Amount>().is_err());
        assert!("1.2.3".parse::<Amount>().is_err());
        assert!(matches!(
            "1_000".parse::<Amount>(),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!("1e3".parse::<Amount>().is_err());
        assert!("5.".parse::<Amount>().is_err());
        assert!("-".parse::<Amount>().is_err());
        assert!("+-5".parse::<Amount>().is_err());
    }

    #[test]
    fn test_accepts_signed_plain_decimals() {
        assert_eq!(amount("+5"), Amount::from_units(5));
        assert_eq!(amount("-3.1"), Amount::new(dec!(-3.1)));
        assert_eq!(amount(" 19.95 "), Amount::new(dec!(19.95)));
    }

    #[test]
    fn test_magnitude_is_bounded() {
        let max = Amount::from_units(MAX_AMOUNT_UNITS);
        assert_eq!(amount("1000000000000.00"), max);
        assert_eq!(max.to_string(), "1000000000000.00");
        assert!(max.is_within_limit());

        assert!(matches!(
            "1000000000000.01".parse::<Amount>(),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            "79228162514264337593543950335".parse::<Amount>(),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!("-1000000000000.01".parse::<Amount>().is_err());
        assert!(Amount::try_new(Decimal::MAX).is_err());

        // the largest accepted values still combine without overflow
        let line = max.multiply_by_quantity(crate::MAX_ITEM_QUANTITY);
        assert_eq!(line.to_string(), "999000000000000.00");
        assert_eq!((max + max).to_string(), "2000000000000.00");
        assert!(!(max + max).is_within_limit());
    }

    #[test]
    fn test_increase_by_adds_vat() {
        // 19.95 × 1.12 = 22.344 → 22.34
        let gross = amount("19.95").increase_by(Percentage::new(12));
        assert_eq!(gross, amount("22.34"));

        // 97.95 × 1.25 = 122.4375 → 122.44
        let gross = amount("97.95").increase_by(Percentage::new(25));
        assert_eq!(gross, amount("122.44"));
    }

    #[test]
    fn test_decrease_by() {
        assert_eq!(
            amount("100.00").decrease_by(Percentage::new(25)),
            amount("75.00")
        );
        // 9.99 × 0.9 = 8.991 → 8.99
        assert_eq!(amount("9.99").decrease_by(Percentage::new(10)), amount("8.99"));
    }

    #[test]
    fn test_arithmetic() {
        let a = amount("50.00");
        let b = amount("44.68");

        assert_eq!(a + b, amount("94.68"));
        assert_eq!(a - b, amount("5.32"));
        assert_eq!(b.subtract(a), amount("-5.32"));
        assert_eq!(-b, amount("-44.68"));
        assert_eq!(b.multiply_by_quantity(-1), amount("-44.68"));

        let total: Amount = vec![a, b, amount("0.32")].into_iter().sum();
        assert_eq!(total, amount("95.00"));
    }

    #[test]
    fn test_sign_checks() {
        assert!(amount("0.01").is_positive());
        assert!(amount("-0.01").is_negative());
        assert!(!Amount::zero().is_positive());
        assert!(!Amount::zero().is_negative());
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_string(&amount("44.68")).unwrap();
        assert_eq!(json, "\"44.68\"");

        let parsed: Amount = serde_json::from_str("\"5.3\"").unwrap();
        assert_eq!(parsed, amount("5.30"));

        assert!(serde_json::from_str::<Amount>("\"five\"").is_err());
    }
}
