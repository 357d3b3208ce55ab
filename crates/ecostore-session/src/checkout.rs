//! # Checkout Engine
//!
//! The order-session state machine and the coupon/discount arithmetic that
//! turns a cart into a payable total.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout State Machine                               │
//! │                                                                         │
//! │            begin()            submit_address()      complete_purchase() │
//! │  ┌───────┐ cart non-empty ┌────────────────┐ valid ┌────────────┐      │
//! │  │ Empty │───────────────►│ AddressPending │──────►│ ReadyToPay │      │
//! │  └───────┘                └────────────────┘       └─────┬──────┘      │
//! │                                 │    ▲                   │             │
//! │                  invalid address│    │ edit address      ▼             │
//! │                  (stays, error) └────┘            ┌────────────┐       │
//! │                                                   │ Processing │       │
//! │                                                   └─────┬──────┘       │
//! │                                                         │              │
//! │                                      gateway Ok ────────┼──── Err      │
//! │                                          ▼              ▼              │
//! │                                   ┌───────────┐   ┌──────────┐         │
//! │                                   │ Completed │   │  Failed  │         │
//! │                                   │ cart ✓    │   │ cart     │         │
//! │                                   │ cleared   │   │ intact,  │         │
//! │                                   └───────────┘   │ retryable│         │
//! │                                                   └──────────┘         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Coupons are applied to the session (not consumed) before payment; the
//! completed purchase is the only thing that marks one used.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use ecostore_core::cart::Cart;
use ecostore_core::money::{self, Money};
use ecostore_core::types::{Order, PaymentMethod, ShippingAddress};
use ecostore_core::validation::validate_address;

use crate::error::{SessionError, SessionResult};
use crate::wallet::Wallet;

// =============================================================================
// Policy Constants
// =============================================================================

/// Flat shipping charge added to every order.
pub const SHIPPING_COST: Money = Money::from_rupees(49);

// =============================================================================
// Checkout Stage
// =============================================================================

/// Where the order session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStage {
    /// No checkout in progress.
    Empty,
    /// Awaiting a complete shipping address.
    AddressPending,
    /// Address accepted; awaiting payment confirmation.
    ReadyToPay,
    /// Order submission in flight. Re-entry is rejected.
    Processing,
    /// Order accepted by the backend; cart cleared, rewards credited.
    Completed,
    /// Submission failed; cart intact, purchase retryable.
    Failed,
}

impl Default for CheckoutStage {
    fn default() -> Self {
        CheckoutStage::Empty
    }
}

// =============================================================================
// Checkout Session
// =============================================================================

/// Per-order transient state: the stage, the shipping address, the applied
/// coupon, and the last submission error.
///
/// Owned by the [`SessionStore`](crate::store::SessionStore); not part of
/// the persisted snapshot.
#[derive(Debug, Clone, Default)]
pub struct CheckoutSession {
    pub stage: CheckoutStage,
    pub address: Option<ShippingAddress>,

    /// Code of the coupon currently applied to this session, if any.
    /// At most one at a time; cleared on removal or completed purchase.
    pub applied_coupon: Option<String>,

    /// Error surfaced by the last failed submission.
    pub last_error: Option<String>,
}

impl CheckoutSession {
    pub fn new() -> Self {
        CheckoutSession::default()
    }

    /// Starts (or restarts) a checkout for a non-empty cart.
    pub fn begin(&mut self, cart_is_empty: bool) -> SessionResult<()> {
        if cart_is_empty {
            return Err(SessionError::EmptyCart);
        }
        self.stage = CheckoutStage::AddressPending;
        self.last_error = None;
        Ok(())
    }

    /// Submits the shipping address, advancing to `ReadyToPay`.
    ///
    /// All four fields must be non-empty; otherwise the stage is unchanged
    /// and the validation error is surfaced inline.
    pub fn submit_address(&mut self, address: ShippingAddress) -> SessionResult<()> {
        match self.stage {
            // Editing the address from ReadyToPay is allowed; it re-runs
            // validation the same way.
            CheckoutStage::AddressPending | CheckoutStage::ReadyToPay => {}
            stage => {
                return Err(SessionError::InvalidStage {
                    stage,
                    operation: "submit address",
                })
            }
        }

        validate_address(&address)?;
        self.address = Some(address);
        self.stage = CheckoutStage::ReadyToPay;
        Ok(())
    }

    /// Computes the payable quote for the current cart and wallet.
    ///
    /// `total = max(subtotal − discount, 0) + shipping`, where the
    /// discount comes from the applied coupon (zero if none, or if the
    /// applied coupon has since been spent).
    pub fn quote(&self, cart: &Cart, wallet: &Wallet) -> CheckoutQuote {
        let subtotal = cart.subtotal();

        if cart.is_empty() {
            return CheckoutQuote::empty();
        }

        let discount = self
            .applied_coupon
            .as_deref()
            .and_then(|code| wallet.find_unused_coupon(code))
            .map(|coupon| coupon.discount_for(subtotal))
            .unwrap_or_else(Money::zero);

        CheckoutQuote {
            subtotal,
            discount,
            shipping: SHIPPING_COST,
            total: (subtotal - discount).clamp_non_negative() + SHIPPING_COST,
            eco_coins: cart.eco_coins(),
            applied_coupon: self.applied_coupon.clone(),
        }
    }
}

// =============================================================================
// Checkout Quote
// =============================================================================

/// The order summary shown before payment.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutQuote {
    #[serde(with = "money::rupee_decimal")]
    #[ts(as = "f64")]
    pub subtotal: Money,

    #[serde(with = "money::rupee_decimal")]
    #[ts(as = "f64")]
    pub discount: Money,

    #[serde(with = "money::rupee_decimal")]
    #[ts(as = "f64")]
    pub shipping: Money,

    #[serde(with = "money::rupee_decimal")]
    #[ts(as = "f64")]
    pub total: Money,

    /// EcoCoins this purchase will earn.
    pub eco_coins: i64,

    pub applied_coupon: Option<String>,
}

impl CheckoutQuote {
    fn empty() -> Self {
        CheckoutQuote {
            subtotal: Money::zero(),
            discount: Money::zero(),
            shipping: Money::zero(),
            total: Money::zero(),
            eco_coins: 0,
            applied_coupon: None,
        }
    }
}

// =============================================================================
// Order Gateway
// =============================================================================

/// The payload submitted to the order service.
///
/// Serializes to the backend's create-order contract:
/// `{shippingAddress, orderItems: [{productId, quantity}], paymentMethod,
/// paymentId, couponCode}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub shipping_address: ShippingAddress,
    pub order_items: Vec<OrderRequestItem>,
    pub payment_method: PaymentMethod,

    /// Gateway payment reference for prepaid orders.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
}

/// One line of the order payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequestItem {
    pub product_id: i64,
    pub quantity: i64,
}

/// Failure reported by an order gateway.
///
/// Carries the message to surface; the gateway logs the underlying cause.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct GatewayError {
    pub message: String,
}

impl GatewayError {
    pub fn new(message: impl Into<String>) -> Self {
        GatewayError {
            message: message.into(),
        }
    }
}

/// The seam between the checkout engine and the external order service.
///
/// The REST client implements this against `POST /api/orders`; tests
/// inject a fake. Submission is not idempotent, so implementations must
/// not retry internally.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    async fn submit_order(&self, request: &OrderRequest) -> Result<Order, GatewayError>;
}

// =============================================================================
// Unit Tests
// =============================================================================
