//! # EcoCoin Rewards
//!
//! The EcoCoin accrual rule and the redemption reward catalog.
//!
//! ## The Accrual Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CANONICAL ACCRUAL POLICY                                               │
//! │                                                                         │
//! │  coins = floor(unit_price_in_rupees / 10)       1 coin per whole ₹10    │
//! │                                                                         │
//! │  Applied PER UNIT, then multiplied by quantity:                         │
//! │    ₹199 × 2  →  floor(199/10) × 2  =  19 × 2  =  38 coins               │
//! │                                                                         │
//! │  NOT on the line subtotal: floor(398/10) = 39 would award a coin for    │
//! │  paise that no single unit earned, and the error grows with quantity.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Redeeming converts coins back into discount coupons at 1 coin = ₹1 of
//! reward value, through the fixed reward catalog below.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{self, Money};

// =============================================================================
// Accrual
// =============================================================================

/// Number of rupees that earn one EcoCoin.
pub const RUPEES_PER_COIN: i64 = 10;

/// Returns the EcoCoins earned for a single unit at the given price.
///
/// ## Properties
/// - Never negative (negative prices award 0)
/// - Monotonically non-decreasing in price
///
/// ## Example
/// ```rust
/// use ecostore_core::money::Money;
/// use ecostore_core::rewards::eco_coins_for;
///
/// assert_eq!(eco_coins_for(Money::from_rupees(199)), 19);
/// assert_eq!(eco_coins_for(Money::from_rupees(105)), 10);
/// assert_eq!(eco_coins_for(Money::from_rupees(9)), 0);
/// ```
pub fn eco_coins_for(unit_price: Money) -> i64 {
    if unit_price.is_negative() {
        return 0;
    }
    unit_price.rupees() / RUPEES_PER_COIN
}

/// Converts a coin amount to its discount value (1 coin = ₹1).
pub fn coins_to_discount(coins: i64) -> Money {
    Money::from_rupees(coins.max(0))
}

// =============================================================================
// Reward Catalog
// =============================================================================

/// What a redemption option grants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RewardKind {
    /// Mints a single-use fixed-amount coupon.
    Coupon {
        /// Code tag, e.g. "ECO150" → codes like `ECO150-7GQ2ZK`.
        prefix: String,

        /// Face value of the minted coupon.
        #[serde(with = "money::rupee_decimal")]
        #[ts(as = "f64")]
        discount: Money,
    },

    /// A non-coupon perk fulfilled outside the wallet (e.g. tree planting).
    Perk,
}

/// A reward the wallet can exchange coins for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RedemptionOption {
    pub id: u32,

    /// Display label, e.g. "₹150 Off Coupon".
    pub label: String,

    /// Coin cost of this reward.
    pub coins: i64,

    pub description: String,

    pub reward: RewardKind,
}

impl RedemptionOption {
    /// The standard reward catalog.
    pub fn catalog() -> Vec<RedemptionOption> {
        vec![
            RedemptionOption {
                id: 1,
                label: "₹50 Off Coupon".to_string(),
                coins: 100,
                description: "Get ₹50 off on your next eco-friendly purchase".to_string(),
                reward: RewardKind::Coupon {
                    prefix: "ECO50".to_string(),
                    discount: Money::from_rupees(50),
                },
            },
            RedemptionOption {
                id: 2,
                label: "₹150 Off Coupon".to_string(),
                coins: 200,
                description: "Get ₹150 off on your next eco-friendly purchase".to_string(),
                reward: RewardKind::Coupon {
                    prefix: "ECO150".to_string(),
                    discount: Money::from_rupees(150),
                },
            },
        ]
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accrual_basic() {
        assert_eq!(eco_coins_for(Money::from_rupees(199)), 19);
        assert_eq!(eco_coins_for(Money::from_rupees(200)), 20);
        assert_eq!(eco_coins_for(Money::from_rupees(10)), 1);
        assert_eq!(eco_coins_for(Money::from_rupees(0)), 0);
    }

    /// The divergent case between the two historical formulas: ₹105 must
    /// award 10 coins, not 0.
    #[test]
    fn test_accrual_non_multiple_of_hundred() {
        assert_eq!(eco_coins_for(Money::from_rupees(105)), 10);
    }

    #[test]
    fn test_accrual_never_negative() {
        assert_eq!(eco_coins_for(Money::from_rupees(-50)), 0);
        assert_eq!(eco_coins_for(Money::from_paise(-1)), 0);
    }

    #[test]
    fn test_accrual_monotonic() {
        let mut last = 0;
        for rupees in 0..500 {
            let coins = eco_coins_for(Money::from_rupees(rupees));
            assert!(coins >= last, "accrual decreased at ₹{}", rupees);
            last = coins;
        }
    }

    /// Fractional rupees never round a coin into existence: ₹9.99 earns 0.
    #[test]
    fn test_accrual_floors_fractional_prices() {
        assert_eq!(eco_coins_for(Money::from_paise(999)), 0);
        assert_eq!(eco_coins_for(Money::from_paise(1999)), 1);
    }

    #[test]
    fn test_coins_to_discount() {
        assert_eq!(coins_to_discount(200), Money::from_rupees(200));
        assert_eq!(coins_to_discount(-5), Money::zero());
    }

    #[test]
    fn test_catalog_options() {
        let catalog = RedemptionOption::catalog();
        assert_eq!(catalog.len(), 2);

        let big = catalog.iter().find(|o| o.coins == 200).unwrap();
        match &big.reward {
            RewardKind::Coupon { prefix, discount } => {
                assert_eq!(prefix, "ECO150");
                assert_eq!(*discount, Money::from_rupees(150));
            }
            RewardKind::Perk => panic!("expected a coupon reward"),
        }
    }
}
