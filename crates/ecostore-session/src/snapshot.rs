//! # Session Snapshot
//!
//! Explicit load/save boundary for persisting session state across
//! restarts (the frontend keeps it in local storage).
//!
//! ## Cache, Not System of Record
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Snapshot Lifecycle                                   │
//! │                                                                         │
//! │  Session start:  storage ──► from_json() ──► SessionStore::hydrate()   │
//! │                                  │                                      │
//! │                                  ▼                                      │
//! │                  backend reads (balance, orders) OVERWRITE the         │
//! │                  snapshot's figures — the backend always wins           │
//! │                                                                         │
//! │  Session end:    SessionStore::snapshot() ──► to_json() ──► storage     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The checkout session (stage, address, applied coupon) is transient and
//! deliberately not captured: a half-finished checkout does not survive a
//! restart.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ecostore_core::cart::Cart;
use ecostore_core::types::EnvironmentalImpact;

use crate::wallet::Wallet;

/// The durable parts of a session, ready for serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub cart: Cart,
    pub wallet: Wallet,
    pub impact: EnvironmentalImpact,

    /// When this snapshot was taken.
    pub saved_at: DateTime<Utc>,
}

impl SessionSnapshot {
    /// Captures the given session parts.
    pub fn capture(cart: &Cart, wallet: &Wallet, impact: &EnvironmentalImpact) -> Self {
        SessionSnapshot {
            cart: cart.clone(),
            wallet: wallet.clone(),
            impact: *impact,
            saved_at: Utc::now(),
        }
    }

    /// Serializes to the JSON string stored by the frontend.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parses a snapshot previously produced by [`SessionSnapshot::to_json`].
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SessionStore;
    use ecostore_core::money::Money;
    use ecostore_core::rewards::RedemptionOption;
    use ecostore_core::types::Product;

    fn product(id: i64, rupees: i64) -> Product {
        Product {
            id,
            name: format!("Product {}", id),
            category: "Home".to_string(),
            description: String::new(),
            price: Money::from_rupees(rupees),
            quantity: 10,
            image_url: String::new(),
            carbon_saved: 1.0,
            water_reduced: 5.0,
            plastic_items_avoided: 1,
        }
    }

    #[test]
    fn test_snapshot_round_trip_restores_session() {
        let store = SessionStore::with_wallet(Wallet::with_balance(250));
        store.add_to_cart(&product(1, 199), 2).unwrap();

        let option = RedemptionOption::catalog()
            .into_iter()
            .find(|o| o.coins == 200)
            .unwrap();
        let code = store.redeem(&option).unwrap().coupon_code.unwrap();

        let json = store.snapshot().to_json().unwrap();

        let restored = SessionStore::new();
        restored.hydrate(SessionSnapshot::from_json(&json).unwrap());

        assert_eq!(restored.eco_coin_balance(), 50);
        assert_eq!(restored.cart_view().totals.item_count, 2);
        assert_eq!(restored.redemption_history().len(), 1);

        // The minted coupon survives and is still spendable
        restored.add_to_cart(&product(2, 300), 1).unwrap();
        assert!(restored.apply_coupon(&code).is_ok());
    }

    #[test]
    fn test_snapshot_does_not_capture_checkout_state() {
        let store = SessionStore::new();
        store.add_to_cart(&product(1, 100), 1).unwrap();
        store.begin_checkout().unwrap();

        let snapshot = store.snapshot();
        let restored = SessionStore::new();
        restored.hydrate(snapshot);

        use crate::checkout::CheckoutStage;
        assert_eq!(restored.checkout_stage(), CheckoutStage::Empty);
    }
}
