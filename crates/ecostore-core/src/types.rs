//! # Domain Types
//!
//! Core domain types used throughout the EcoStore client.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │     Order       │   │ RedemptionRecord│       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  id (i64)       │   │  id (UUID)      │       │
//! │  │  price (Money)  │   │  status         │   │  label          │       │
//! │  │  eco attributes │   │  final_price    │   │  coins          │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ ShippingAddress │   │   OrderStatus   │   │ PaymentMethod   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  street, city   │   │  Placed         │   │  Cod            │       │
//! │  │  state, zip     │   │  Confirmed ...  │   │  Razorpay       │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All wire-facing types serialize as camelCase JSON, matching what the
//! backend emits and what the TypeScript frontend expects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{self, Money};

// =============================================================================
// Product
// =============================================================================

/// A product in the sustainable-goods catalog.
///
/// Owned by the catalog service; immutable from the client's perspective.
/// The environmental attributes are per-unit figures the impact accumulator
/// multiplies by purchased quantity.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Catalog identifier.
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Catalog category (e.g. "Home", "Personal Care").
    pub category: String,

    /// Longer description for the detail page.
    #[serde(default)]
    pub description: String,

    /// Unit price. Decimal rupees on the wire, integer paise in memory.
    #[serde(with = "money::rupee_decimal")]
    #[ts(as = "f64")]
    pub price: Money,

    /// Units in stock (catalog-side figure).
    #[serde(default)]
    pub quantity: i64,

    /// Image reference.
    #[serde(default)]
    pub image_url: String,

    /// Kilograms of CO₂ avoided per unit versus a conventional alternative.
    #[serde(default)]
    pub carbon_saved: f64,

    /// Litres of water saved per unit.
    #[serde(default)]
    pub water_reduced: f64,

    /// Single-use plastic items avoided per unit.
    #[serde(default)]
    pub plastic_items_avoided: i64,
}

// =============================================================================
// Environmental Impact
// =============================================================================

/// Running totals of sustainability metrics across completed purchases.
///
/// ## Invariant
/// Monotonically non-decreasing: deltas are clamped at zero before being
/// added, so a malformed catalog entry can never shrink the totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentalImpact {
    /// Kilograms of CO₂ avoided.
    pub carbon_saved: f64,

    /// Litres of water saved.
    pub water_reduced: f64,

    /// Single-use plastic items avoided.
    pub plastic_avoided: f64,
}

impl EnvironmentalImpact {
    /// Zero impact.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Accrues another impact delta into this accumulator.
    ///
    /// Negative components are clamped to zero to preserve monotonicity.
    pub fn accrue(&mut self, delta: &EnvironmentalImpact) {
        self.carbon_saved += delta.carbon_saved.max(0.0);
        self.water_reduced += delta.water_reduced.max(0.0);
        self.plastic_avoided += delta.plastic_avoided.max(0.0);
    }

    /// Sums two impacts without mutating either.
    pub fn plus(&self, other: &EnvironmentalImpact) -> EnvironmentalImpact {
        let mut out = *self;
        out.accrue(other);
        out
    }
}

// =============================================================================
// Shipping Address
// =============================================================================

/// A shipping address for checkout.
///
/// All four fields must be non-empty before the checkout session can
/// advance to payment; see `validation::validate_address`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

impl ShippingAddress {
    /// Formats the address as the single line the order service stores.
    ///
    /// ## Example
    /// ```rust
    /// use ecostore_core::types::ShippingAddress;
    ///
    /// let addr = ShippingAddress {
    ///     street_address: "12 Banyan Road".into(),
    ///     city: "Pune".into(),
    ///     state: "MH".into(),
    ///     zip_code: "411001".into(),
    /// };
    /// assert_eq!(addr.formatted(), "12 Banyan Road, Pune, MH - 411001");
    /// ```
    pub fn formatted(&self) -> String {
        format!(
            "{}, {}, {} - {}",
            self.street_address, self.city, self.state, self.zip_code
        )
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// Fulfilment status of an order, as the order service reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Order received by the backend.
    Placed,
    /// Confirmed by the store.
    Confirmed,
    /// Handed to the courier.
    Shipped,
    /// Delivered to the customer.
    Delivered,
    /// Cancelled before fulfilment.
    Cancelled,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Placed
    }
}

// =============================================================================
// Payment
// =============================================================================

/// How the customer pays for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    /// Cash on delivery.
    Cod,
    /// Prepaid through the Razorpay popup flow.
    Razorpay,
}

/// Settlement status of an order's payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    /// Awaiting settlement (all COD orders until delivery).
    Pending,
    /// Settled.
    Completed,
    /// Gateway reported a failed charge.
    Failed,
    /// Settled, then refunded.
    Refunded,
}

// =============================================================================
// Order
// =============================================================================

/// A line item within an order, as returned by the order service.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product: Product,
    pub quantity: i64,

    /// Line price (unit price × quantity) at the time of ordering.
    #[serde(with = "money::rupee_decimal")]
    #[ts(as = "f64")]
    pub price: Money,
}

/// An order as the order service reports it.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,

    #[ts(as = "String")]
    pub order_date: DateTime<Utc>,

    /// Single-line formatted address (see [`ShippingAddress::formatted`]).
    pub shipping_address: String,

    pub order_status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,

    /// Gateway payment reference, when prepaid.
    #[serde(default)]
    pub payment_id: Option<String>,

    pub order_items: Vec<OrderItem>,

    /// Sum of line prices before discount and shipping.
    #[serde(with = "money::rupee_decimal")]
    #[ts(as = "f64")]
    pub total_price: Money,

    /// Coupon discount applied to this order.
    #[serde(with = "money::rupee_decimal")]
    #[ts(as = "f64")]
    pub discount: Money,

    /// What the customer actually paid (total − discount + shipping).
    #[serde(with = "money::rupee_decimal")]
    #[ts(as = "f64")]
    pub final_price: Money,
}

// =============================================================================
// Redemption Record
// =============================================================================

/// One entry in the wallet's redemption history.
///
/// Append-only, newest first. Owned by the redemption ledger.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RedemptionRecord {
    /// Client-generated identifier (UUID v4).
    pub id: String,

    #[ts(as = "String")]
    pub redeemed_at: DateTime<Utc>,

    /// Reward label, e.g. "₹150 Off Coupon".
    pub label: String,

    /// Coins spent on this redemption.
    pub coins: i64,

    /// Code of the coupon minted by this redemption, when the reward
    /// grants one.
    #[serde(default)]
    pub coupon_code: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================
