//! # Session Store
//!
//! The single owner of all mutable client state: cart, wallet,
//! environmental impact, and the checkout session.
//!
//! ## Ownership & Locking
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    SessionStore (Arc<Mutex<Session>>)                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐  ┌────────────┐  │
//! │  │     Cart     │  │    Wallet    │  │    Impact    │  │  Checkout  │  │
//! │  │              │  │              │  │              │  │            │  │
//! │  │  lines       │  │  balance     │  │  cumulative  │  │  stage     │  │
//! │  │  subtotal    │  │  coupons     │  │  totals      │  │  address   │  │
//! │  │              │  │  history     │  │              │  │  coupon    │  │
//! │  └──────────────┘  └──────────────┘  └──────────────┘  └────────────┘  │
//! │                                                                         │
//! │  ONE lock over the whole session. Every operation is a single          │
//! │  lock-scoped transition, so read-then-write sequences ("check          │
//! │  balance, then decrement") can never interleave — even when two        │
//! │  async callers overlap because of a double-click.                      │
//! │                                                                         │
//! │  The one suspend point (order submission) happens OUTSIDE the lock:    │
//! │  a locked transition into Processing blocks re-entry, the await        │
//! │  runs unlocked, and a second locked transition applies the outcome.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store is injected into handlers rather than living in ambient
//! global state, so every operation is testable in isolation.

use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use ts_rs::TS;

use ecostore_core::cart::{Cart, CartLine, CartTotals};
use ecostore_core::coupon::Coupon;
use ecostore_core::rewards::RedemptionOption;
use ecostore_core::types::{
    EnvironmentalImpact, Order, PaymentMethod, Product, RedemptionRecord, ShippingAddress,
};
use ecostore_core::validation::{validate_coupon_code, validate_quantity};

use crate::checkout::{
    CheckoutQuote, CheckoutSession, CheckoutStage, OrderGateway, OrderRequest, OrderRequestItem,
};
use crate::error::{SessionError, SessionResult};
use crate::snapshot::SessionSnapshot;
use crate::wallet::{Redemption, Wallet};

// =============================================================================
// Session State
// =============================================================================

/// Everything the session owns, guarded as one unit.
#[derive(Debug, Default)]
pub(crate) struct Session {
    pub(crate) cart: Cart,
    pub(crate) wallet: Wallet,
    pub(crate) impact: EnvironmentalImpact,
    pub(crate) checkout: CheckoutSession,
}

// =============================================================================
// Frontend Views
// =============================================================================

/// Cart response including lines and totals.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        CartView {
            lines: cart.lines.clone(),
            totals: CartTotals::from(cart),
        }
    }
}

/// What a completed purchase produced.
#[derive(Debug, Clone)]
pub struct PurchaseOutcome {
    /// The order as the backend recorded it.
    pub order: Order,

    /// EcoCoins credited for this purchase.
    pub coins_earned: i64,

    /// Environmental impact accrued by this purchase.
    pub impact: EnvironmentalImpact,
}

// =============================================================================
// Session Store
// =============================================================================

/// Thread-safe handle to the session state.
///
/// ## Thread Safety
/// Uses `Arc<Mutex<Session>>` because:
/// - `Arc`: shared ownership across handlers
/// - `Mutex`: one writer at a time per logical operation
///
/// ## Why Not RwLock?
/// Session operations are quick and most of them write. A RwLock would add
/// complexity with minimal benefit.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<Mutex<Session>>,
}

impl SessionStore {
    /// Creates a store with an empty cart and wallet.
    pub fn new() -> Self {
        SessionStore::default()
    }

    /// Creates a store around a wallet hydrated from the backend
    /// (e.g. the `/ecocoins/balance` read at login).
    pub fn with_wallet(wallet: Wallet) -> Self {
        let store = SessionStore::new();
        store.lock().wallet = wallet;
        store
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        self.inner.lock().expect("session mutex poisoned")
    }

    // =========================================================================
    // Cart Operations
    // =========================================================================

    /// Adds a product to the cart (insert, or increment an existing line).
    pub fn add_to_cart(&self, product: &Product, quantity: i64) -> SessionResult<CartView> {
        validate_quantity(quantity)?;
        debug!(product_id = product.id, quantity, "add_to_cart");

        let mut session = self.lock();
        session.cart.add_item(product, quantity)?;
        Ok(CartView::from(&session.cart))
    }

    /// Removes a line unconditionally. Unknown ids are a silent no-op.
    pub fn remove_from_cart(&self, product_id: i64) -> CartView {
        debug!(product_id, "remove_from_cart");

        let mut session = self.lock();
        session.cart.remove_item(product_id);
        CartView::from(&session.cart)
    }

    /// Overwrites a line's quantity (no-op below 1; use remove to delete).
    pub fn set_quantity(&self, product_id: i64, quantity: i64) -> SessionResult<CartView> {
        debug!(product_id, quantity, "set_quantity");

        let mut session = self.lock();
        session.cart.set_quantity(product_id, quantity)?;
        Ok(CartView::from(&session.cart))
    }

    /// Increases a line's quantity by one.
    pub fn increase_quantity(&self, product_id: i64) -> SessionResult<CartView> {
        let mut session = self.lock();
        session.cart.increase_quantity(product_id)?;
        Ok(CartView::from(&session.cart))
    }

    /// Decreases a line's quantity by one; at 1 the line is removed.
    pub fn decrease_quantity(&self, product_id: i64) -> CartView {
        let mut session = self.lock();
        session.cart.decrease_quantity(product_id);
        CartView::from(&session.cart)
    }

    /// Clears the cart (user cancelled, or a fresh session).
    pub fn clear_cart(&self) -> CartView {
        debug!("clear_cart");

        let mut session = self.lock();
        session.cart.clear();
        CartView::from(&session.cart)
    }

    /// Current cart contents and totals.
    pub fn cart_view(&self) -> CartView {
        CartView::from(&self.lock().cart)
    }

    // =========================================================================
    // Wallet Operations
    // =========================================================================

    /// Current EcoCoin balance.
    pub fn eco_coin_balance(&self) -> i64 {
        self.lock().wallet.balance
    }

    /// Overwrites the balance with a backend-sourced figure.
    ///
    /// The backend is the system of record; local state is a cache.
    pub fn set_balance(&self, balance: i64) {
        self.lock().wallet.balance = balance.max(0);
    }

    /// Credits coins (e.g. confirmed by the backend after an order).
    pub fn credit_coins(&self, coins: i64) {
        self.lock().wallet.credit(coins);
    }

    /// Exchanges coins for a reward. One atomic transition: the balance
    /// check and the decrement happen under the same lock acquisition.
    pub fn redeem(&self, option: &RedemptionOption) -> SessionResult<Redemption> {
        self.lock().wallet.redeem(option)
    }

    /// All coupons in the wallet, spent or not.
    pub fn coupons(&self) -> Vec<Coupon> {
        self.lock().wallet.coupons.clone()
    }

    /// Redemption ledger, newest first.
    pub fn redemption_history(&self) -> Vec<RedemptionRecord> {
        self.lock().wallet.history.clone()
    }

    /// Cumulative environmental impact across completed purchases.
    pub fn environmental_impact(&self) -> EnvironmentalImpact {
        self.lock().impact
    }

    // =========================================================================
    // Checkout Operations
    // =========================================================================

    /// Starts a checkout for the current (non-empty) cart.
    pub fn begin_checkout(&self) -> SessionResult<()> {
        let mut session = self.lock();
        let empty = session.cart.is_empty();
        session.checkout.begin(empty)
    }

    /// Submits the shipping address, advancing to `ReadyToPay`.
    pub fn submit_address(&self, address: ShippingAddress) -> SessionResult<()> {
        self.lock().checkout.submit_address(address)
    }

    /// Current checkout stage.
    pub fn checkout_stage(&self) -> CheckoutStage {
        self.lock().checkout.stage
    }

    /// The payable quote for the current cart, coupon, and shipping.
    pub fn quote(&self) -> CheckoutQuote {
        let session = self.lock();
        session.checkout.quote(&session.cart, &session.wallet)
    }

    /// Applies a coupon by code.
    ///
    /// ## Rejections
    /// - No unused wallet coupon matches (case-insensitive): "invalid or
    ///   used"
    /// - Fixed coupon with subtotal under ₹300: minimum-spend message
    ///
    /// Success holds the coupon against the session; it is only marked
    /// used by a completed purchase.
    pub fn apply_coupon(&self, code: &str) -> SessionResult<CheckoutQuote> {
        validate_coupon_code(code)?;

        let mut guard = self.lock();
        let session = &mut *guard;

        let subtotal = session.cart.subtotal();
        let coupon = session
            .wallet
            .find_unused_coupon(code)
            .ok_or(SessionError::CouponNotFound)?;

        if !coupon.meets_minimum_spend(subtotal) {
            return Err(SessionError::MinimumSpendNotMet);
        }

        let canonical = coupon.code.clone();
        info!(code = %canonical, "coupon applied");
        session.checkout.applied_coupon = Some(canonical);

        Ok(session.checkout.quote(&session.cart, &session.wallet))
    }

    /// Clears the applied coupon unconditionally.
    pub fn remove_coupon(&self) -> CheckoutQuote {
        let mut guard = self.lock();
        let session = &mut *guard;

        session.checkout.applied_coupon = None;
        session.checkout.quote(&session.cart, &session.wallet)
    }

    /// Completes the purchase through the injected order gateway.
    ///
    /// ## Transitions
    /// Valid only from `ReadyToPay` (or `Failed`, for a retry). The store
    /// moves to `Processing` under the lock before awaiting — a second
    /// overlapping call is rejected with `InvalidStage` rather than
    /// submitting the order twice.
    ///
    /// ## On Success
    /// Marks the applied coupon used, accrues environmental impact,
    /// credits EcoCoins, clears the cart, stage `Completed`.
    ///
    /// ## On Failure
    /// Stage `Failed`, error surfaced; the cart is NOT cleared, so the
    /// user can retry.
    pub async fn complete_purchase(
        &self,
        gateway: &dyn OrderGateway,
        payment_method: PaymentMethod,
        payment_id: Option<String>,
    ) -> SessionResult<PurchaseOutcome> {
        // Phase 1: locked transition into Processing.
        let request = {
            let mut session = self.lock();

            match session.checkout.stage {
                CheckoutStage::ReadyToPay | CheckoutStage::Failed => {}
                stage => {
                    return Err(SessionError::InvalidStage {
                        stage,
                        operation: "complete purchase",
                    })
                }
            }

            if session.cart.is_empty() {
                return Err(SessionError::EmptyCart);
            }

            let Some(address) = session.checkout.address.clone() else {
                return Err(SessionError::InvalidStage {
                    stage: session.checkout.stage,
                    operation: "complete purchase",
                });
            };

            let request = OrderRequest {
                shipping_address: address,
                order_items: session
                    .cart
                    .lines
                    .iter()
                    .map(|l| OrderRequestItem {
                        product_id: l.product_id,
                        quantity: l.quantity,
                    })
                    .collect(),
                payment_method,
                payment_id,
                coupon_code: session.checkout.applied_coupon.clone(),
            };

            session.checkout.stage = CheckoutStage::Processing;
            request
        };

        debug!(items = request.order_items.len(), "submitting order");

        // Phase 2: the suspend point, outside the lock.
        let result = gateway.submit_order(&request).await;

        // Phase 3: locked apply of the outcome.
        let mut session = self.lock();
        match result {
            Ok(order) => {
                let coins_earned = session.cart.eco_coins();
                let impact_delta = session.cart.impact();

                if let Some(code) = session.checkout.applied_coupon.take() {
                    session.wallet.mark_coupon_used(&code);
                }
                session.impact.accrue(&impact_delta);
                session.wallet.credit(coins_earned);
                session.cart.clear();
                session.checkout.stage = CheckoutStage::Completed;
                session.checkout.last_error = None;

                info!(order_id = order.id, coins_earned, "purchase completed");

                Ok(PurchaseOutcome {
                    order,
                    coins_earned,
                    impact: impact_delta,
                })
            }
            Err(err) => {
                session.checkout.stage = CheckoutStage::Failed;
                session.checkout.last_error = Some(err.message.clone());

                warn!(error = %err, "order submission failed; cart left intact");

                Err(SessionError::OrderSubmission(err.message))
            }
        }
    }

    // =========================================================================
    // Snapshot Boundary
    // =========================================================================

    /// Serializes the durable parts of the session (cart, wallet, impact).
    ///
    /// The checkout session is transient and not captured.
    pub fn snapshot(&self) -> SessionSnapshot {
        let session = self.lock();
        SessionSnapshot::capture(&session.cart, &session.wallet, &session.impact)
    }

    /// Restores a previously captured snapshot.
    ///
    /// Used at session start; backend-sourced reads (balance, orders)
    /// overwrite snapshot data afterwards.
    pub fn hydrate(&self, snapshot: SessionSnapshot) {
        let mut session = self.lock();
        session.cart = snapshot.cart;
        session.wallet = snapshot.wallet;
        session.impact = snapshot.impact;
        session.checkout = CheckoutSession::new();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use ecostore_core::money::Money;
    use ecostore_core::types::{OrderStatus, PaymentStatus};

    use crate::checkout::GatewayError;

    // -------------------------------------------------------------------------
    // Fixtures
    // -------------------------------------------------------------------------

    struct FakeGateway {
        fail: bool,
    }

    #[async_trait]
    impl OrderGateway for FakeGateway {
        async fn submit_order(&self, request: &OrderRequest) -> Result<Order, GatewayError> {
            if self.fail {
                return Err(GatewayError::new("order service unavailable"));
            }

            Ok(Order {
                id: 42,
                order_date: Utc::now(),
                shipping_address: request.shipping_address.formatted(),
                order_status: OrderStatus::Placed,
                payment_method: request.payment_method,
                payment_status: PaymentStatus::Pending,
                payment_id: request.payment_id.clone(),
                order_items: Vec::new(),
                total_price: Money::zero(),
                discount: Money::zero(),
                final_price: Money::zero(),
            })
        }
    }

    fn product(id: i64, rupees: i64) -> Product {
        Product {
            id,
            name: format!("Product {}", id),
            category: "Home".to_string(),
            description: String::new(),
            price: Money::from_rupees(rupees),
            quantity: 10,
            image_url: String::new(),
            carbon_saved: 2.0,
            water_reduced: 50.0,
            plastic_items_avoided: 1,
        }
    }

    fn address() -> ShippingAddress {
        ShippingAddress {
            street_address: "12 Banyan Road".to_string(),
            city: "Pune".to_string(),
            state: "MH".to_string(),
            zip_code: "411001".to_string(),
        }
    }

    fn option_150() -> RedemptionOption {
        RedemptionOption::catalog()
            .into_iter()
            .find(|o| o.coins == 200)
            .unwrap()
    }

    /// Builds a store holding one ₹400 line and a minted ₹150 coupon.
    fn store_with_coupon() -> (SessionStore, String) {
        let store = SessionStore::with_wallet(Wallet::with_balance(200));
        let code = store.redeem(&option_150()).unwrap().coupon_code.unwrap();
        store.add_to_cart(&product(1, 400), 1).unwrap();
        (store, code)
    }

    // -------------------------------------------------------------------------
    // Coupon Application
    // -------------------------------------------------------------------------

    #[test]
    fn test_apply_unknown_coupon_rejected() {
        let store = SessionStore::new();
        store.add_to_cart(&product(1, 400), 1).unwrap();

        let err = store.apply_coupon("ECO50-NOSUCH").unwrap_err();
        assert!(matches!(err, SessionError::CouponNotFound));
    }

    #[test]
    fn test_apply_coupon_below_minimum_spend_rejected() {
        let store = SessionStore::with_wallet(Wallet::with_balance(200));
        let code = store.redeem(&option_150()).unwrap().coupon_code.unwrap();
        store.add_to_cart(&product(1, 299), 1).unwrap();

        let err = store.apply_coupon(&code).unwrap_err();
        assert!(matches!(err, SessionError::MinimumSpendNotMet));
    }

    #[test]
    fn test_apply_coupon_at_minimum_spend_boundary() {
        let store = SessionStore::with_wallet(Wallet::with_balance(200));
        let code = store.redeem(&option_150()).unwrap().coupon_code.unwrap();
        store.add_to_cart(&product(1, 300), 1).unwrap();

        let quote = store.apply_coupon(&code).unwrap();
        assert_eq!(quote.discount, Money::from_rupees(150));
    }

    #[test]
    fn test_remove_coupon_is_unconditional() {
        let store = SessionStore::new();
        store.add_to_cart(&product(1, 100), 1).unwrap();

        // Nothing applied; removal is still fine
        let quote = store.remove_coupon();
        assert_eq!(quote.discount, Money::zero());
    }

    // -------------------------------------------------------------------------
    // Purchase Flow
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_complete_purchase_happy_path() {
        let (store, code) = store_with_coupon();

        store.begin_checkout().unwrap();
        store.submit_address(address()).unwrap();
        store.apply_coupon(&code).unwrap();

        let quote = store.quote();
        assert_eq!(quote.total, Money::from_rupees(400 - 150 + 49));

        let gateway = FakeGateway { fail: false };
        let outcome = store
            .complete_purchase(&gateway, PaymentMethod::Cod, None)
            .await
            .unwrap();

        // ₹400 earns floor(400/10) = 40 coins
        assert_eq!(outcome.coins_earned, 40);
        assert_eq!(outcome.order.id, 42);

        assert_eq!(store.checkout_stage(), CheckoutStage::Completed);
        assert!(store.cart_view().lines.is_empty());
        assert_eq!(store.eco_coin_balance(), 40);

        // The coupon is spent exactly once
        let coupons = store.coupons();
        assert!(coupons.iter().all(|c| c.used));
        let err = store.apply_coupon(&code);
        assert!(matches!(err, Err(SessionError::CouponNotFound)));

        let impact = store.environmental_impact();
        assert_eq!(impact.carbon_saved, 2.0);
        assert_eq!(impact.water_reduced, 50.0);
        assert_eq!(impact.plastic_avoided, 1.0);
    }

    #[tokio::test]
    async fn test_failed_purchase_keeps_cart_and_coupon() {
        let (store, code) = store_with_coupon();

        store.begin_checkout().unwrap();
        store.submit_address(address()).unwrap();
        store.apply_coupon(&code).unwrap();

        let gateway = FakeGateway { fail: true };
        let err = store
            .complete_purchase(&gateway, PaymentMethod::Cod, None)
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::OrderSubmission(_)));

        assert_eq!(store.checkout_stage(), CheckoutStage::Failed);
        assert_eq!(store.cart_view().lines.len(), 1);
        assert_eq!(store.eco_coin_balance(), 0);
        assert!(store.coupons().iter().all(|c| !c.used));

        // Retry from Failed succeeds
        let gateway = FakeGateway { fail: false };
        store
            .complete_purchase(&gateway, PaymentMethod::Cod, None)
            .await
            .unwrap();
        assert_eq!(store.checkout_stage(), CheckoutStage::Completed);
    }

    #[tokio::test]
    async fn test_complete_purchase_requires_ready_stage() {
        let store = SessionStore::new();
        store.add_to_cart(&product(1, 100), 1).unwrap();

        let gateway = FakeGateway { fail: false };
        let err = store
            .complete_purchase(&gateway, PaymentMethod::Cod, None)
            .await
            .unwrap_err();

        assert!(matches!(err, SessionError::InvalidStage { .. }));
        // Nothing changed
        assert_eq!(store.cart_view().lines.len(), 1);
    }

    #[tokio::test]
    async fn test_purchase_without_coupon_credits_coins() {
        let store = SessionStore::new();
        store.add_to_cart(&product(1, 199), 2).unwrap();
        store.begin_checkout().unwrap();
        store.submit_address(address()).unwrap();

        let gateway = FakeGateway { fail: false };
        let outcome = store
            .complete_purchase(&gateway, PaymentMethod::Razorpay, Some("pay_123".to_string()))
            .await
            .unwrap();

        assert_eq!(outcome.coins_earned, 38);
        assert_eq!(outcome.order.payment_id.as_deref(), Some("pay_123"));
        assert_eq!(store.eco_coin_balance(), 38);
    }

    // -------------------------------------------------------------------------
    // Cart Pass-Through
    // -------------------------------------------------------------------------

    #[test]
    fn test_cart_operations_through_store() {
        let store = SessionStore::new();
        store.add_to_cart(&product(1, 100), 1).unwrap();
        store.add_to_cart(&product(1, 100), 1).unwrap();

        let view = store.cart_view();
        assert_eq!(view.lines.len(), 1);
        assert_eq!(view.totals.item_count, 2);

        let view = store.decrease_quantity(1);
        assert_eq!(view.totals.item_count, 1);

        // Decreasing at quantity 1 removes the line entirely
        let view = store.decrease_quantity(1);
        assert!(view.lines.is_empty());
    }

    #[test]
    fn test_add_to_cart_rejects_invalid_quantity() {
        let store = SessionStore::new();
        let err = store.add_to_cart(&product(1, 100), 0);
        assert!(matches!(err, Err(SessionError::Validation(_))));
    }

    #[test]
    fn test_begin_checkout_requires_items() {
        let store = SessionStore::new();
        assert!(matches!(
            store.begin_checkout(),
            Err(SessionError::EmptyCart)
        ));
    }
}
