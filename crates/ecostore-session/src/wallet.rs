//! # EcoCoin Wallet
//!
//! The wallet owns the EcoCoin balance, the held coupons, and the
//! redemption history (the redemption ledger).
//!
//! ## Redemption Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Redemption Flow                                    │
//! │                                                                         │
//! │  redeem(option)                                                         │
//! │       │                                                                 │
//! │       ├── balance < option.coins ──► Err(InsufficientCoins)             │
//! │       │                              (balance & history unchanged)      │
//! │       ▼                                                                 │
//! │  balance -= option.coins                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  history.prepend(RedemptionRecord)          (newest first)              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  reward grants a coupon? ──► mint Coupon (unique code) ──► coupons      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Ok(Redemption { message embedding the code })                          │
//! │                                                                         │
//! │  NOT idempotent: a second call with sufficient balance redeems again    │
//! │  and mints a second coupon. The UI disables the button in flight.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The check-then-decrement is a single `&mut self` method, so under the
//! session store's lock it is one atomic transition — two overlapping
//! redemption calls can never both observe the same stale balance.

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use ecostore_core::coupon::{self, Coupon};
use ecostore_core::rewards::{RedemptionOption, RewardKind};
use ecostore_core::types::RedemptionRecord;

use crate::error::{SessionError, SessionResult};

// =============================================================================
// Redemption Outcome
// =============================================================================

/// The result of a successful redemption.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Redemption {
    /// The ledger entry that was appended.
    pub record: RedemptionRecord,

    /// The minted coupon code, for rewards that grant one.
    pub coupon_code: Option<String>,

    /// Human-readable confirmation, e.g.
    /// "Successfully redeemed! Your coupon code is: ECO150-7GQ2ZK".
    pub message: String,
}

// =============================================================================
// Wallet
// =============================================================================

/// The EcoCoin wallet: balance, coupons, and redemption ledger.
///
/// ## Invariants
/// - `balance >= 0` always; redemption is rejected rather than overdrawn
/// - `history` is newest-first and append-only
/// - A coupon with `used = true` stays in the list (for display) but is
///   never matched by [`Wallet::find_unused_coupon`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    /// Current EcoCoin balance.
    pub balance: i64,

    /// Coupons minted by redemptions, spent or not.
    pub coupons: Vec<Coupon>,

    /// Redemption ledger, newest first.
    pub history: Vec<RedemptionRecord>,
}

impl Wallet {
    /// Creates an empty wallet.
    pub fn new() -> Self {
        Wallet::default()
    }

    /// Creates a wallet with a starting balance (e.g. hydrated from the
    /// backend's `/ecocoins/balance`).
    pub fn with_balance(balance: i64) -> Self {
        Wallet {
            balance: balance.max(0),
            ..Wallet::default()
        }
    }

    /// Credits coins earned from a purchase. Negative credits are ignored.
    pub fn credit(&mut self, coins: i64) {
        if coins > 0 {
            self.balance += coins;
            debug!(coins, balance = self.balance, "EcoCoins credited");
        }
    }

    /// Exchanges coins for a reward.
    ///
    /// ## Behavior
    /// - `balance < option.coins`: rejected, nothing changes
    /// - Otherwise: balance decremented by exactly `option.coins`, one
    ///   record prepended, and a coupon minted when the reward grants one
    pub fn redeem(&mut self, option: &RedemptionOption) -> SessionResult<Redemption> {
        if self.balance < option.coins {
            return Err(SessionError::InsufficientCoins {
                balance: self.balance,
                required: option.coins,
            });
        }

        self.balance -= option.coins;

        let mut coupon_code = None;
        let mut message = format!("Successfully redeemed {}!", option.label);

        if let RewardKind::Coupon { prefix, discount } = &option.reward {
            let coupon = self.mint_coupon(prefix, *discount, &option.description);
            message = format!(
                "Successfully redeemed! Your coupon code is: {}",
                coupon.code
            );
            coupon_code = Some(coupon.code.clone());
            self.coupons.push(coupon);
        }

        let record = RedemptionRecord {
            id: Uuid::new_v4().to_string(),
            redeemed_at: Utc::now(),
            label: option.label.clone(),
            coins: option.coins,
            coupon_code: coupon_code.clone(),
        };
        self.history.insert(0, record.clone());

        info!(
            label = %option.label,
            coins = option.coins,
            balance = self.balance,
            "EcoCoins redeemed"
        );

        Ok(Redemption {
            record,
            coupon_code,
            message,
        })
    }

    /// Finds an unused coupon by case-insensitive code match.
    pub fn find_unused_coupon(&self, code: &str) -> Option<&Coupon> {
        self.coupons
            .iter()
            .find(|c| !c.used && c.matches_code(code))
    }

    /// Marks the coupon with the given code as used.
    ///
    /// Called exactly once, by the completed purchase that spends it.
    pub fn mark_coupon_used(&mut self, code: &str) {
        if let Some(c) = self.coupons.iter_mut().find(|c| c.matches_code(code)) {
            c.used = true;
        }
    }

    /// All coupons that can still be spent.
    pub fn unused_coupons(&self) -> impl Iterator<Item = &Coupon> {
        self.coupons.iter().filter(|c| !c.used)
    }

    /// Mints a fixed-amount coupon with a code that is unique among the
    /// coupons this wallet currently holds.
    ///
    /// The 36^6 suffix space makes collisions vanishingly rare; the loop
    /// turns "rare" into "impossible" for the codes we can actually see.
    fn mint_coupon(
        &self,
        prefix: &str,
        discount: ecostore_core::Money,
        description: &str,
    ) -> Coupon {
        let mut code = coupon::format_code(prefix, &generate_code_suffix());
        while self.coupons.iter().any(|c| c.matches_code(&code)) {
            code = coupon::format_code(prefix, &generate_code_suffix());
        }

        Coupon::fixed(code, discount, description)
    }
}

// =============================================================================
// Code Generation
// =============================================================================

/// Draws a random suffix of [`coupon::CODE_SUFFIX_LEN`] characters
/// uniformly from [`coupon::CODE_ALPHABET`].
fn generate_code_suffix() -> String {
    let mut rng = rand::thread_rng();
    (0..coupon::CODE_SUFFIX_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..coupon::CODE_ALPHABET.len());
            coupon::CODE_ALPHABET[idx] as char
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ecostore_core::Money;

    fn option_150() -> RedemptionOption {
        RedemptionOption::catalog()
            .into_iter()
            .find(|o| o.coins == 200)
            .unwrap()
    }

    #[test]
    fn test_redeem_with_insufficient_balance_changes_nothing() {
        let mut wallet = Wallet::with_balance(150);

        let err = wallet.redeem(&option_150()).unwrap_err();

        assert!(matches!(
            err,
            SessionError::InsufficientCoins {
                balance: 150,
                required: 200
            }
        ));
        assert_eq!(wallet.balance, 150);
        assert!(wallet.history.is_empty());
        assert!(wallet.coupons.is_empty());
    }

    /// Worked scenario: balance 250, redeem {coins: 200, "₹150 Off"} ⇒
    /// balance 50, one record, code matching ECO150-[A-Z0-9]{6}.
    #[test]
    fn test_redeem_success() {
        let mut wallet = Wallet::with_balance(250);

        let redemption = wallet.redeem(&option_150()).unwrap();

        assert_eq!(wallet.balance, 50);
        assert_eq!(wallet.history.len(), 1);
        assert_eq!(wallet.history[0].coins, 200);

        let code = redemption.coupon_code.unwrap();
        assert!(code.starts_with("ECO150-"));
        assert!(coupon::is_well_formed(&code));
        assert!(redemption.message.contains(&code));

        let minted = wallet.find_unused_coupon(&code).unwrap();
        assert!(!minted.used);
        assert_eq!(
            minted.discount_for(Money::from_rupees(1000)),
            Money::from_rupees(150)
        );
    }

    #[test]
    fn test_history_is_newest_first() {
        let mut wallet = Wallet::with_balance(500);

        wallet.redeem(&option_150()).unwrap();
        let second = wallet.redeem(&option_150()).unwrap();

        assert_eq!(wallet.history.len(), 2);
        assert_eq!(wallet.history[0].id, second.record.id);
    }

    /// Redemption is intentionally not idempotent: with sufficient balance
    /// a replay mints a second, distinct coupon.
    #[test]
    fn test_redeem_twice_mints_two_coupons() {
        let mut wallet = Wallet::with_balance(400);

        let first = wallet.redeem(&option_150()).unwrap();
        let second = wallet.redeem(&option_150()).unwrap();

        assert_eq!(wallet.balance, 0);
        assert_eq!(wallet.coupons.len(), 2);
        assert_ne!(first.coupon_code, second.coupon_code);
    }

    #[test]
    fn test_used_coupon_is_never_matched() {
        let mut wallet = Wallet::with_balance(200);
        let code = wallet.redeem(&option_150()).unwrap().coupon_code.unwrap();

        assert!(wallet.find_unused_coupon(&code).is_some());

        wallet.mark_coupon_used(&code);

        assert!(wallet.find_unused_coupon(&code).is_none());
        // The coupon itself stays in the wallet for display
        assert_eq!(wallet.coupons.len(), 1);
        assert!(wallet.coupons[0].used);
    }

    #[test]
    fn test_find_coupon_is_case_insensitive() {
        let mut wallet = Wallet::with_balance(200);
        let code = wallet.redeem(&option_150()).unwrap().coupon_code.unwrap();

        assert!(wallet.find_unused_coupon(&code.to_lowercase()).is_some());
    }

    #[test]
    fn test_credit_ignores_non_positive() {
        let mut wallet = Wallet::new();
        wallet.credit(38);
        wallet.credit(0);
        wallet.credit(-10);
        assert_eq!(wallet.balance, 38);
    }

    #[test]
    fn test_generated_suffix_shape() {
        for _ in 0..50 {
            let suffix = generate_code_suffix();
            assert_eq!(suffix.len(), coupon::CODE_SUFFIX_LEN);
            assert!(suffix.bytes().all(|b| coupon::CODE_ALPHABET.contains(&b)));
        }
    }
}
