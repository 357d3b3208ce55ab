//! # Cart Ledger
//!
//! The session's pending purchase selection.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Ledger Operations                               │
//! │                                                                         │
//! │  Frontend Action          Operation               Ledger Change         │
//! │  ───────────────          ─────────               ─────────────         │
//! │                                                                         │
//! │  Click "Add to Cart" ────► add_item() ──────────► insert or qty += 1    │
//! │                                                                         │
//! │  Change quantity ────────► set_quantity() ──────► line.qty = n          │
//! │                                                                         │
//! │  Click "+" / "−" ────────► increase/decrease ───► qty ± 1               │
//! │                            (− at qty 1 removes the line entirely)       │
//! │                                                                         │
//! │  Click remove ───────────► remove_item() ───────► line deleted          │
//! │                                                                         │
//! │  Purchase completes ─────► clear() ─────────────► empty cart            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Semantics
//! Operations addressed at a product id that is not in the cart are silent
//! no-ops, not errors: the UI can only reference products it already
//! rendered, so an unknown id means a stale click, not a bug worth
//! surfacing. Quantity and size ceilings, by contrast, are typed errors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;
use crate::money::{self, Money};
use crate::rewards::eco_coins_for;
use crate::types::{EnvironmentalImpact, Product};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

// =============================================================================
// Cart Line
// =============================================================================

/// A line in the cart: one product at some quantity.
///
/// ## Design Notes
/// The line holds a snapshot of the product data taken when it was added
/// (price, name, per-unit environmental attributes). If the catalog entry
/// changes afterwards, the cart keeps displaying what the customer agreed
/// to.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Catalog id of the product (for lookups and the order payload).
    pub product_id: i64,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Unit price at time of adding (frozen).
    #[serde(with = "money::rupee_decimal")]
    #[ts(as = "f64")]
    pub unit_price: Money,

    /// Per-unit CO₂ saving at time of adding (frozen).
    pub carbon_saved: f64,

    /// Per-unit water saving at time of adding (frozen).
    pub water_reduced: f64,

    /// Per-unit plastic items avoided at time of adding (frozen).
    pub plastic_items_avoided: i64,

    /// Image reference for the cart display.
    pub image_url: String,

    /// Quantity in cart. Invariant: >= 1 (a line at 0 is removed).
    pub quantity: i64,

    /// When this line was first added.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// Creates a new cart line from a product and quantity.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        CartLine {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.price,
            carbon_saved: product.carbon_saved,
            water_reduced: product.water_reduced,
            plastic_items_avoided: product.plastic_items_avoided,
            image_url: product.image_url.clone(),
            quantity,
            added_at: Utc::now(),
        }
    }

    /// Line total (unit price × quantity).
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// EcoCoins this line will earn: the per-unit accrual times quantity.
    ///
    /// Computed per unit so a floor boundary is never amplified by
    /// quantity (₹199 × 2 earns 38 coins, not floor(398/10) = 39).
    pub fn eco_coins(&self) -> i64 {
        eco_coins_for(self.unit_price) * self.quantity
    }

    /// Environmental impact this line contributes when purchased.
    pub fn impact(&self) -> EnvironmentalImpact {
        let qty = self.quantity as f64;
        EnvironmentalImpact {
            carbon_saved: self.carbon_saved * qty,
            water_reduced: self.water_reduced * qty,
            plastic_avoided: self.plastic_items_avoided as f64 * qty,
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by `product_id` (adding the same product again
///   increases quantity)
/// - Quantity is always >= 1 (decreasing past 1 removes the line)
/// - Maximum unique lines: [`MAX_CART_ITEMS`]
/// - Maximum quantity per line: [`MAX_ITEM_QUANTITY`]
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Lines in the cart.
    pub lines: Vec<CartLine>,

    /// When the cart was created/last cleared.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            lines: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds a product to the cart, or increases its quantity if a line for
    /// it already exists.
    ///
    /// ## Returns
    /// - `Ok(())` on success
    /// - `Err(CoreError)` if a quantity or cart-size ceiling would be hit
    pub fn add_item(&mut self, product: &Product, quantity: i64) -> Result<(), CoreError> {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            let new_qty = line.quantity + quantity;
            if new_qty > MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            line.quantity = new_qty;
            return Ok(());
        }

        if self.lines.len() >= MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }

        if quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }

        self.lines.push(CartLine::from_product(product, quantity));
        Ok(())
    }

    /// Overwrites a line's quantity.
    ///
    /// ## Behavior
    /// - `quantity < 1`: no-op (use [`Cart::remove_item`] to delete)
    /// - Unknown product id: no-op
    /// - Above [`MAX_ITEM_QUANTITY`]: typed error
    pub fn set_quantity(&mut self, product_id: i64, quantity: i64) -> Result<(), CoreError> {
        if quantity < 1 {
            return Ok(());
        }

        if quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = quantity;
        }
        Ok(())
    }

    /// Increases a line's quantity by one.
    pub fn increase_quantity(&mut self, product_id: i64) -> Result<(), CoreError> {
        let Some(current) = self.quantity_of(product_id) else {
            return Ok(());
        };
        self.set_quantity(product_id, current + 1)
    }

    /// Decreases a line's quantity by one.
    ///
    /// Decreasing below 1 removes the line entirely; a quantity of 0 is
    /// never stored.
    pub fn decrease_quantity(&mut self, product_id: i64) {
        match self.quantity_of(product_id) {
            Some(q) if q > 1 => {
                // set_quantity cannot fail when lowering
                let _ = self.set_quantity(product_id, q - 1);
            }
            Some(_) => self.remove_item(product_id),
            None => {}
        }
    }

    /// Removes a line unconditionally. Unknown ids are a silent no-op.
    pub fn remove_item(&mut self, product_id: i64) {
        self.lines.retain(|l| l.product_id != product_id);
    }

    /// Clears all lines from the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.created_at = Utc::now();
    }

    /// Returns the quantity of the given product, if it is in the cart.
    pub fn quantity_of(&self, product_id: i64) -> Option<i64> {
        self.lines
            .iter()
            .find(|l| l.product_id == product_id)
            .map(|l| l.quantity)
    }

    /// Number of unique lines in the cart.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total quantity across all lines.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Subtotal: Σ unit price × quantity.
    pub fn subtotal(&self) -> Money {
        self.lines
            .iter()
            .fold(Money::zero(), |acc, l| acc + l.line_total())
    }

    /// EcoCoins the whole cart will earn when purchased.
    pub fn eco_coins(&self) -> i64 {
        self.lines.iter().map(|l| l.eco_coins()).sum()
    }

    /// Environmental impact the whole cart contributes when purchased.
    pub fn impact(&self) -> EnvironmentalImpact {
        self.lines
            .iter()
            .fold(EnvironmentalImpact::zero(), |acc, l| acc.plus(&l.impact()))
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Default for Cart {
    fn default() -> Self {
        Cart::new()
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Cart totals summary for frontend responses.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: usize,
    pub item_count: i64,

    #[serde(with = "money::rupee_decimal")]
    #[ts(as = "f64")]
    pub subtotal: Money,

    /// EcoCoins the cart will earn on purchase.
    pub eco_coins: i64,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            item_count: cart.item_count(),
            subtotal: cart.subtotal(),
            eco_coins: cart.eco_coins(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product(id: i64, price_rupees: i64) -> Product {
        Product {
            id,
            name: format!("Product {}", id),
            category: "Home".to_string(),
            description: String::new(),
            price: Money::from_rupees(price_rupees),
            quantity: 100,
            image_url: String::new(),
            carbon_saved: 0.5,
            water_reduced: 10.0,
            plastic_items_avoided: 2,
        }
    }

    #[test]
    fn test_add_item() {
        let mut cart = Cart::new();
        let product = test_product(1, 199);

        cart.add_item(&product, 2).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.subtotal(), Money::from_rupees(398));
    }

    #[test]
    fn test_add_same_product_twice_keeps_one_line() {
        let mut cart = Cart::new();
        let product = test_product(1, 199);

        cart.add_item(&product, 1).unwrap();
        cart.add_item(&product, 1).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.quantity_of(1), Some(2));
    }

    #[test]
    fn test_subtotal_tracks_quantity_changes() {
        let mut cart = Cart::new();
        cart.add_item(&test_product(1, 100), 1).unwrap();
        cart.add_item(&test_product(2, 250), 2).unwrap();
        assert_eq!(cart.subtotal(), Money::from_rupees(600));

        cart.set_quantity(2, 1).unwrap();
        assert_eq!(cart.subtotal(), Money::from_rupees(350));

        cart.remove_item(1);
        assert_eq!(cart.subtotal(), Money::from_rupees(250));
    }

    #[test]
    fn test_set_quantity_below_one_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(&test_product(1, 100), 3).unwrap();

        cart.set_quantity(1, 0).unwrap();
        cart.set_quantity(1, -4).unwrap();

        assert_eq!(cart.quantity_of(1), Some(3));
    }

    #[test]
    fn test_decrease_at_quantity_one_removes_line() {
        let mut cart = Cart::new();
        cart.add_item(&test_product(1, 100), 1).unwrap();

        cart.decrease_quantity(1);

        assert!(cart.is_empty());
        assert_eq!(cart.quantity_of(1), None);
    }

    #[test]
    fn test_operations_on_unknown_id_are_silent() {
        let mut cart = Cart::new();
        cart.add_item(&test_product(1, 100), 1).unwrap();

        cart.remove_item(99);
        cart.decrease_quantity(99);
        cart.set_quantity(99, 5).unwrap();
        cart.increase_quantity(99).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.quantity_of(1), Some(1));
    }

    #[test]
    fn test_quantity_ceiling() {
        let mut cart = Cart::new();
        let product = test_product(1, 100);
        cart.add_item(&product, MAX_ITEM_QUANTITY).unwrap();

        let err = cart.add_item(&product, 1);
        assert!(matches!(err, Err(CoreError::QuantityTooLarge { .. })));
    }

    /// Worked scenario: cart = [{price: ₹199, qty: 2}]
    /// subtotal = ₹398, EcoCoins = 2 × floor(199/10) = 38.
    #[test]
    fn test_spec_scenario_199_twice() {
        let mut cart = Cart::new();
        cart.add_item(&test_product(1, 199), 2).unwrap();

        assert_eq!(cart.subtotal().paise(), 39800);
        assert_eq!(cart.eco_coins(), 38);
    }

    #[test]
    fn test_impact_scales_with_quantity() {
        let mut cart = Cart::new();
        cart.add_item(&test_product(1, 100), 3).unwrap();

        let impact = cart.impact();
        assert_eq!(impact.carbon_saved, 1.5);
        assert_eq!(impact.water_reduced, 30.0);
        assert_eq!(impact.plastic_avoided, 6.0);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add_item(&test_product(1, 100), 2).unwrap();
        assert!(!cart.is_empty());

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }
}
