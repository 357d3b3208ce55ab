//! # ecostore-core: Pure Business Logic for the EcoStore Client
//!
//! This crate is the **heart** of the EcoStore client. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      EcoStore Client Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (web storefront)                    │   │
//! │  │    Catalog UI ──► Cart UI ──► Checkout UI ──► Wallet UI        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    ecostore-session                             │   │
//! │  │    SessionStore: wallet, checkout state machine, snapshots     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ ecostore-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │  coupon   │  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │  Coupon   │  │   │
//! │  │   │   Order   │  │  (paise)  │  │ CartLine  │  │  rules    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐                                 │   │
//! │  │   │  rewards  │  │ validation│                                 │   │
//! │  │   │  EcoCoin  │  │   rules   │                                 │   │
//! │  │   │  accrual  │  │   checks  │                                 │   │
//! │  │   └───────────┘  └───────────┘                                 │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    ecostore-api (REST client)                   │   │
//! │  │          auth, catalog, orders, ecocoins, dashboard             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Order, ShippingAddress, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The cart ledger
//! - [`coupon`] - Coupon types and discount rules
//! - [`rewards`] - EcoCoin accrual and the redemption catalog
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Network and file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in paise (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use ecostore_core::cart::Cart;
//! use ecostore_core::money::Money;
//! use ecostore_core::types::Product;
//!
//! let product = Product {
//!     id: 1,
//!     name: "Bamboo Toothbrush".into(),
//!     category: "Personal Care".into(),
//!     description: String::new(),
//!     price: Money::from_rupees(199),
//!     quantity: 40,
//!     image_url: String::new(),
//!     carbon_saved: 0.3,
//!     water_reduced: 12.0,
//!     plastic_items_avoided: 1,
//! };
//!
//! let mut cart = Cart::new();
//! cart.add_item(&product, 2).unwrap();
//!
//! assert_eq!(cart.subtotal(), Money::from_rupees(398));
//! assert_eq!(cart.eco_coins(), 38); // 2 × floor(199 / 10)
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod coupon;
pub mod error;
pub mod money;
pub mod rewards;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use ecostore_core::Money` instead of
// `use ecostore_core::money::Money`

pub use cart::{Cart, CartLine, CartTotals};
pub use coupon::{Coupon, CouponKind};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use rewards::{RedemptionOption, RewardKind};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum unique lines allowed in a single cart.
///
/// ## Business Reason
/// Prevents runaway carts and keeps order payloads reasonable.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single line in the cart.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;
