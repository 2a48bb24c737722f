//! # Money Module
//!
//! Provides the `Money` type for handling monetary values exactly.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: base-10 decimals (rust_decimal)                          │
//! │    1.60 × 5 + 0.75 × 6 = 8.00 + 4.50 = 12.50  exactly                   │
//! │    Unit prices keep whatever precision they were entered with;          │
//! │    nothing is rounded until the caller asks for it.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cart_core::money::Money;
//!
//! let price: Money = "1.60".parse().unwrap();
//! let line_total = price.multiply_quantity(5);
//! assert_eq!(line_total, "8.00".parse::<Money>().unwrap());
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// An exact monetary amount, currency-agnostic.
///
/// ## Design Decisions
/// - **Decimal**: arbitrary scale, base-10, no binary rounding surprises
/// - **Signed**: the type can hold zero and negatives so that validation can
///   reject them; the cart never stores a non-positive unit price
/// - **Serialized as a string**: `"12.50"` survives JSON round trips without
///   passing through a float
///
/// ## Where Money is Used
/// ```text
/// Item.unit_price ──► Item.line_total() ──► Cart.total_value()
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct Money(#[ts(type = "string")] Decimal);

impl Money {
    /// Wraps an exact decimal amount.
    #[inline]
    pub const fn from_decimal(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from an integer count of cents.
    ///
    /// ## Example
    /// ```rust
    /// use cart_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.to_string(), "10.99");
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    /// Returns the underlying decimal.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero, the additive identity.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is strictly greater than zero.
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use cart_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total, Money::from_cents(897));
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * Decimal::from(qty))
    }

    /// Multiplies by a quantity, or `None` if the product overflows or would
    /// need more digits than a `Decimal` holds.
    ///
    /// `Decimal` multiplication silently drops fractional digits when the
    /// mantissa runs out. The quantity has scale 0, so an exact product always
    /// keeps the unit price's scale; anything else was rounded.
    ///
    /// ```rust
    /// use cart_core::money::Money;
    ///
    /// let price: Money = "7.922816251426433759354395033".parse().unwrap();
    /// assert!(price.checked_mul_quantity(11).is_none());
    /// assert_eq!(Money::from_cents(150).checked_mul_quantity(2), Some(Money::from_cents(300)));
    /// ```
    pub fn checked_mul_quantity(&self, qty: i64) -> Option<Self> {
        self.0
            .checked_mul(Decimal::from(qty))
            .filter(|product| product.scale() == self.0.scale())
            .map(Money)
    }

    /// Adds two amounts, or `None` if the sum overflows or loses digits.
    pub fn checked_add(&self, other: Money) -> Option<Self> {
        let scale = self.0.scale().max(other.0.scale());
        self.0
            .checked_add(other.0)
            .filter(|sum| sum.scale() == scale)
            .map(Money)
    }

    /// Rounds to two decimal places using Bankers Rounding.
    ///
    /// Cart arithmetic never calls this. It exists for callers that need a
    /// presentable figure once the exact total has been computed.
    ///
    /// ```rust
    /// use cart_core::money::Money;
    ///
    /// let exact: Money = "2.125".parse().unwrap();
    /// assert_eq!(exact.round_to_cents().to_string(), "2.12");
    /// ```
    pub fn round_to_cents(&self) -> Self {
        Money(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven),
        )
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim())
            .map(Money)
            .map_err(|e| ValidationError::InvalidFormat {
                field: "amount".to_string(),
                reason: e.to_string(),
            })
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Multiplication by a quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
