//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise                                            │
//! │    ₹199.00 is stored as 19900 paise (i64)                               │
//! │    All arithmetic is exact; only the wire boundary sees decimals        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use ecostore_core::money::Money;
//!
//! // Create from paise (preferred)
//! let price = Money::from_paise(19900); // ₹199.00
//!
//! // Arithmetic operations
//! let doubled = price * 2;                       // ₹398.00
//! let total = price + Money::from_rupees(49);    // ₹248.00
//! ```
//!
//! The backend speaks decimal rupees in JSON. The [`rupee_decimal`] serde
//! helper converts at that boundary so nothing inside the client ever
//! touches floating-point money.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (paise for INR).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for refunds, discounts
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## Where Money Flows
/// ```text
/// Product.price ──► CartLine.unit_price ──► CartLine.line_total
///                                                  │
///     Cart.subtotal ◄──────────────────────────────┘
///          │
///          ▼
///     Coupon discount ──► Checkout total ──► Order.final_price
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use ecostore_core::money::Money;
    ///
    /// let price = Money::from_paise(19900); // Represents ₹199.00
    /// assert_eq!(price.paise(), 19900);
    /// ```
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from whole rupees.
    ///
    /// ## Example
    /// ```rust
    /// use ecostore_core::money::Money;
    ///
    /// let shipping = Money::from_rupees(49);
    /// assert_eq!(shipping.paise(), 4900);
    /// ```
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees * 100)
    }

    /// Creates a Money value from major and minor units (rupees and paise).
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -₹5.50, not -₹4.50
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in paise (smallest currency unit).
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (rupees) portion.
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (paise) portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Returns the smaller of two Money values.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        if self.0 <= other.0 {
            self
        } else {
            other
        }
    }

    /// Clamps a negative value up to zero.
    ///
    /// Used when a discount could otherwise push a total below zero.
    #[inline]
    pub const fn clamp_non_negative(self) -> Self {
        if self.0 < 0 {
            Money(0)
        } else {
            self
        }
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use ecostore_core::money::Money;
    ///
    /// let unit_price = Money::from_paise(19900); // ₹199.00
    /// let line_total = unit_price.multiply_quantity(2);
    /// assert_eq!(line_total.paise(), 39800); // ₹398.00
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Returns the given fraction of this amount, in basis points.
    ///
    /// ## Arguments
    /// * `bps` - Fraction in basis points (1000 = 10%)
    ///
    /// ## Implementation
    /// Integer math with standard rounding: `(amount * bps + 5000) / 10000`.
    /// i128 intermediate prevents overflow on large amounts.
    ///
    /// ## Example
    /// ```rust
    /// use ecostore_core::money::Money;
    ///
    /// let subtotal = Money::from_rupees(1000);       // ₹1000.00
    /// let discount = subtotal.fraction_bps(1000);    // 10%
    /// assert_eq!(discount.rupees(), 100);            // ₹100.00
    /// ```
    pub fn fraction_bps(&self, bps: u32) -> Money {
        let part = (self.0 as i128 * bps as i128 + 5000) / 10000;
        Money::from_paise(part as i64)
    }
}

// =============================================================================
// Wire Serialization Helper
// =============================================================================

/// Serde adapter for fields the backend represents as decimal rupees.
///
/// The REST API (and the TypeScript frontend) exchange prices as JSON
/// numbers like `199.0`. Internally every amount is integer paise. This
/// module converts at the boundary, rounding half away from zero on the
/// way in.
///
/// ## Usage
/// ```rust,ignore
/// #[serde(with = "ecostore_core::money::rupee_decimal")]
/// #[ts(as = "f64")]
/// pub price: Money,
/// ```
pub mod rupee_decimal {
    use super::Money;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(money: &Money, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(money.paise() as f64 / 100.0)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Money, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rupees = f64::deserialize(deserializer)?;
        Ok(Money::from_paise((rupees * 100.0).round() as i64))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging and log lines. Use frontend formatting for actual
/// UI display to handle localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}₹{}.{:02}", sign, self.rupees().abs(), self.paise_part())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i32) -> Self {
        Money(self.0 * qty as i64)
    }
}

/// Multiplication by i64.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_paise() {
        let money = Money::from_paise(19999);
        assert_eq!(money.paise(), 19999);
        assert_eq!(money.rupees(), 199);
        assert_eq!(money.paise_part(), 99);
    }

    #[test]
    fn test_from_rupees_and_major_minor() {
        assert_eq!(Money::from_rupees(300).paise(), 30000);

        let money = Money::from_major_minor(10, 99);
        assert_eq!(money.paise(), 1099);

        let negative = Money::from_major_minor(-5, 50);
        assert_eq!(negative.paise(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_paise(19900)), "₹199.00");
        assert_eq!(format!("{}", Money::from_paise(500)), "₹5.00");
        assert_eq!(format!("{}", Money::from_paise(-550)), "-₹5.50");
        assert_eq!(format!("{}", Money::from_paise(0)), "₹0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_paise(1000);
        let b = Money::from_paise(500);

        assert_eq!((a + b).paise(), 1500);
        assert_eq!((a - b).paise(), 500);
        let result: Money = a * 3;
        assert_eq!(result.paise(), 3000);
    }

    #[test]
    fn test_min_and_clamp() {
        let subtotal = Money::from_rupees(100);
        let discount = Money::from_rupees(150);

        // A fixed discount can never exceed the subtotal
        assert_eq!(discount.min(subtotal), subtotal);
        assert_eq!((subtotal - discount).clamp_non_negative(), Money::zero());
    }

    #[test]
    fn test_fraction_bps() {
        let subtotal = Money::from_rupees(1000);
        assert_eq!(subtotal.fraction_bps(1000).rupees(), 100); // 10%
        assert_eq!(subtotal.fraction_bps(0), Money::zero());

        // ₹10.00 at 8.25% = ₹0.825 → rounds to ₹0.83
        let small = Money::from_paise(1000);
        assert_eq!(small.fraction_bps(825).paise(), 83);
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_paise(19900);
        let line_total = unit_price.multiply_quantity(2);
        assert_eq!(line_total.paise(), 39800);
    }

    #[test]
    fn test_rupee_decimal_boundary() {
        #[derive(serde::Serialize, serde::Deserialize)]
        struct Wire {
            #[serde(with = "rupee_decimal")]
            price: Money,
        }

        let parsed: Wire = serde_json::from_str(r#"{"price":199.0}"#).unwrap();
        assert_eq!(parsed.price.paise(), 19900);

        let parsed: Wire = serde_json::from_str(r#"{"price":105.5}"#).unwrap();
        assert_eq!(parsed.price.paise(), 10550);

        let out = serde_json::to_string(&Wire {
            price: Money::from_paise(4900),
        })
        .unwrap();
        assert_eq!(out, r#"{"price":49.0}"#);
    }
}
