//! # Coupons
//!
//! Discount coupon types and the rules for applying them to a cart
//! subtotal.
//!
//! ## Coupon Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Coupon Lifecycle                                   │
//! │                                                                         │
//! │  Wallet.redeem() ──► mint (used = false)                                │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  Checkout.apply_coupon(code) ──► held by the session (still unused)     │
//! │        │                                                                │
//! │        ├── remove_coupon() ──► released, still spendable later          │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  Purchase completes ──► used = true (permanent; never applies again)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Fixed-amount coupons carry a minimum-spend rule; percentage coupons are
//! stored in basis points so there is no fraction-versus-whole-percent
//! ambiguity anywhere in the arithmetic.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{self, Money};

// =============================================================================
// Policy Constants
// =============================================================================

/// Minimum cart subtotal required to spend a fixed-amount coupon.
/// The boundary is inclusive: a ₹300.00 subtotal qualifies.
pub const MIN_FIXED_COUPON_SPEND: Money = Money::from_rupees(300);

/// Alphabet coupon code suffixes are drawn from.
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of the random suffix in a coupon code.
pub const CODE_SUFFIX_LEN: usize = 6;

// =============================================================================
// Coupon Kind
// =============================================================================

/// The two discount shapes a coupon can carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CouponKind {
    /// Flat amount off the subtotal, clamped so it never exceeds it.
    Fixed {
        #[serde(with = "money::rupee_decimal")]
        #[ts(as = "f64")]
        amount: Money,
    },

    /// Fraction of the subtotal, in basis points (1000 = 10%).
    Percentage { bps: u32 },
}

// =============================================================================
// Coupon
// =============================================================================

/// A single-use discount coupon held in the wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    /// Globally unique code, e.g. `ECO150-7GQ2ZK`.
    pub code: String,

    pub kind: CouponKind,

    /// Human description shown in the wallet.
    pub description: String,

    /// Set once, on the completed purchase that spends the coupon.
    pub used: bool,
}

impl Coupon {
    /// Creates an unused fixed-amount coupon.
    pub fn fixed(code: impl Into<String>, amount: Money, description: impl Into<String>) -> Self {
        Coupon {
            code: code.into(),
            kind: CouponKind::Fixed { amount },
            description: description.into(),
            used: false,
        }
    }

    /// Creates an unused percentage coupon from basis points.
    pub fn percentage(code: impl Into<String>, bps: u32, description: impl Into<String>) -> Self {
        Coupon {
            code: code.into(),
            kind: CouponKind::Percentage { bps },
            description: description.into(),
            used: false,
        }
    }

    /// Case-insensitive code comparison, as the checkout form accepts
    /// codes typed in any case.
    pub fn matches_code(&self, code: &str) -> bool {
        self.code.eq_ignore_ascii_case(code.trim())
    }

    /// Whether the cart subtotal satisfies this coupon's minimum-spend
    /// rule. Only fixed-amount coupons carry one.
    pub fn meets_minimum_spend(&self, subtotal: Money) -> bool {
        match self.kind {
            CouponKind::Fixed { .. } => subtotal >= MIN_FIXED_COUPON_SPEND,
            CouponKind::Percentage { .. } => true,
        }
    }

    /// Computes the discount this coupon takes off the given subtotal.
    ///
    /// ## Rules
    /// - `Fixed` → `min(amount, subtotal)`; the discount can never exceed
    ///   what the cart is worth.
    /// - `Percentage` → `subtotal × bps / 10000`, rounded.
    ///
    /// ## Example
    /// ```rust
    /// use ecostore_core::coupon::Coupon;
    /// use ecostore_core::money::Money;
    ///
    /// let coupon = Coupon::fixed("ECO150-AAAAAA", Money::from_rupees(150), "₹150 off");
    /// let discount = coupon.discount_for(Money::from_rupees(100));
    /// assert_eq!(discount, Money::from_rupees(100)); // clamped to subtotal
    /// ```
    pub fn discount_for(&self, subtotal: Money) -> Money {
        match self.kind {
            CouponKind::Fixed { amount } => amount.min(subtotal).clamp_non_negative(),
            CouponKind::Percentage { bps } => subtotal.fraction_bps(bps),
        }
    }
}

// =============================================================================
// Code Format
// =============================================================================

/// Joins a reward tag and a random suffix into a full code.
pub fn format_code(prefix: &str, suffix: &str) -> String {
    format!("{}-{}", prefix, suffix)
}

/// Checks that a code has the `TAG-XXXXXX` shape with a suffix drawn from
/// [`CODE_ALPHABET`].
pub fn is_well_formed(code: &str) -> bool {
    let Some((prefix, suffix)) = code.rsplit_once('-') else {
        return false;
    };

    if prefix.is_empty() || suffix.len() != CODE_SUFFIX_LEN {
        return false;
    }

    prefix
        .bytes()
        .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        && suffix.bytes().all(|b| CODE_ALPHABET.contains(&b))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_discount_clamped_to_subtotal() {
        let coupon = Coupon::fixed("ECO150-AAAAAA", Money::from_rupees(150), "₹150 off");

        // Never discounts more than the cart is worth
        assert_eq!(
            coupon.discount_for(Money::from_rupees(100)),
            Money::from_rupees(100)
        );
        assert_eq!(
            coupon.discount_for(Money::from_rupees(500)),
            Money::from_rupees(150)
        );
    }

    #[test]
    fn test_percentage_discount_in_basis_points() {
        let coupon = Coupon::percentage("SAVE10-AAAAAA", 1000, "10% off");
        assert_eq!(
            coupon.discount_for(Money::from_rupees(400)),
            Money::from_rupees(40)
        );
    }

    #[test]
    fn test_minimum_spend_boundary_is_inclusive() {
        let coupon = Coupon::fixed("ECO50-AAAAAA", Money::from_rupees(50), "₹50 off");

        assert!(!coupon.meets_minimum_spend(Money::from_paise(29999)));
        assert!(coupon.meets_minimum_spend(Money::from_rupees(300)));
        assert!(coupon.meets_minimum_spend(Money::from_rupees(301)));
    }

    #[test]
    fn test_percentage_coupons_have_no_minimum_spend() {
        let coupon = Coupon::percentage("SAVE10-AAAAAA", 1000, "10% off");
        assert!(coupon.meets_minimum_spend(Money::from_rupees(1)));
    }

    #[test]
    fn test_matches_code_is_case_insensitive() {
        let coupon = Coupon::fixed("ECO150-7GQ2ZK", Money::from_rupees(150), "₹150 off");
        assert!(coupon.matches_code("eco150-7gq2zk"));
        assert!(coupon.matches_code("  ECO150-7GQ2ZK  "));
        assert!(!coupon.matches_code("ECO150-XXXXXX"));
    }

    #[test]
    fn test_code_format() {
        assert!(is_well_formed("ECO150-7GQ2ZK"));
        assert!(is_well_formed("ECO50-AB12CD"));

        assert!(!is_well_formed("ECO150"));          // no suffix
        assert!(!is_well_formed("ECO150-abc123"));   // lowercase suffix
        assert!(!is_well_formed("ECO150-TOOLONG1")); // suffix too long
        assert!(!is_well_formed("-7GQ2ZK"));         // empty tag
    }

    #[test]
    fn test_coupon_wire_shape() {
        let coupon = Coupon::fixed("ECO50-AB12CD", Money::from_rupees(50), "₹50 off");
        let json = serde_json::to_value(&coupon).unwrap();

        assert_eq!(json["kind"]["type"], "fixed");
        assert_eq!(json["kind"]["amount"], 50.0);
        assert_eq!(json["used"], false);
    }
}
