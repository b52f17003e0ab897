//! Cart state and line items.

use crate::cart::{CartSummary, CartTotals, Coupon};
use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product and how many of it are in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartLine {
    /// Product snapshot taken when the line was added.
    pub product: Product,
    /// Always positive inside a [`CartState`].
    pub quantity: u32,
}

impl CartLine {
    /// Create a line.
    pub fn new(product: Product, quantity: u32) -> Self {
        Self { product, quantity }
    }

    /// Product ID of this line.
    pub fn product_id(&self) -> &ProductId {
        &self.product.id
    }

    /// Unit price x quantity.
    pub fn line_total(&self) -> Money {
        self.product.price.saturating_mul(i64::from(self.quantity))
    }
}

/// Lines in insertion order plus at most one applied coupon.
///
/// Invariants maintained by every method:
/// - at most one line per product id
/// - no line has quantity 0
/// - an empty cart carries no coupon
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartState {
    /// Lines in insertion order.
    pub items: Vec<CartLine>,
    /// Applied coupon.
    pub applied_coupon: Option<Coupon>,
}

impl CartState {
    /// Build a state from already-sanitized parts.
    pub fn new(items: Vec<CartLine>, applied_coupon: Option<Coupon>) -> Self {
        let mut state = Self {
            items,
            applied_coupon,
        };
        state.drop_coupon_if_empty();
        state
    }

    /// Add `quantity` of `product`.
    ///
    /// An existing line is incremented (saturating at `u32::MAX`), otherwise
    /// a new line is appended. Returns false for a zero quantity, which
    /// changes nothing.
    pub fn add_item(&mut self, product: Product, quantity: u32) -> bool {
        if quantity == 0 {
            return false;
        }

        if let Some(existing) = self.items.iter_mut().find(|l| l.product.id == product.id) {
            existing.quantity = existing.quantity.saturating_add(quantity);
            return true;
        }

        self.items.push(CartLine::new(product, quantity));
        true
    }

    /// Remove the line for `product_id`. Returns false if there was none.
    pub fn remove_item(&mut self, product_id: &ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|l| &l.product.id != product_id);
        let removed = self.items.len() < len_before;
        if removed {
            self.drop_coupon_if_empty();
        }
        removed
    }

    /// Replace the quantity of an existing line.
    ///
    /// A quantity of zero or less removes the line. Values above `u32::MAX`
    /// are clamped. Returns false if the product is not in the cart.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_item(product_id);
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        match self.items.iter_mut().find(|l| &l.product.id == product_id) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Remove every line and the coupon.
    pub fn clear(&mut self) {
        self.items.clear();
        self.applied_coupon = None;
    }

    /// Replace the applied coupon.
    ///
    /// Returns false, leaving the state unchanged, when the cart is empty.
    pub fn set_coupon(&mut self, coupon: Coupon) -> bool {
        if self.is_empty() {
            return false;
        }
        self.applied_coupon = Some(coupon);
        true
    }

    /// Remove the applied coupon, returning it.
    pub fn remove_coupon(&mut self) -> Option<Coupon> {
        self.applied_coupon.take()
    }

    /// Check if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of line quantities.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Number of distinct products.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Get the line for a product.
    pub fn get_line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.items.iter().find(|l| &l.product.id == product_id)
    }

    /// Derived totals.
    pub fn totals(&self) -> CartTotals {
        CartTotals::calculate(&self.items, self.applied_coupon.as_ref())
    }

    /// Serializable snapshot with line totals.
    pub fn summary(&self) -> CartSummary {
        CartSummary::from_lines(&self.items, self.applied_coupon.as_ref())
    }

    fn drop_coupon_if_empty(&mut self) {
        if self.items.is_empty() {
            self.applied_coupon = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CouponRegistry;

    fn sticker(id: &str, cents: i64) -> Product {
        Product::new(id, format!("sticker-{id}"), format!("Sticker {id}"), Money::from_cents(cents))
    }

    fn save10() -> Coupon {
        CouponRegistry::builtin().validate("SAVE10").unwrap()
    }

    #[test]
    fn test_add_item_is_additive() {
        let mut cart = CartState::default();
        assert!(cart.add_item(sticker("1", 499), 1));
        assert!(cart.add_item(sticker("1", 499), 2));

        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.get_line(&ProductId::new("1")).unwrap().quantity, 3);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let mut cart = CartState::default();
        cart.add_item(sticker("2", 599), 1);
        cart.add_item(sticker("1", 499), 1);
        cart.add_item(sticker("2", 599), 4);

        let ids: Vec<_> = cart.items.iter().map(|l| l.product_id().as_str()).collect();
        assert_eq!(ids, ["2", "1"]);
    }

    #[test]
    fn test_add_zero_is_noop() {
        let mut cart = CartState::default();
        assert!(!cart.add_item(sticker("1", 499), 0));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_saturates() {
        let mut cart = CartState::default();
        cart.add_item(sticker("1", 499), u32::MAX);
        cart.add_item(sticker("1", 499), 5);
        assert_eq!(cart.items[0].quantity, u32::MAX);
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = CartState::default();
        cart.add_item(sticker("1", 499), 1);

        assert!(cart.update_quantity(&ProductId::new("1"), 7));
        assert_eq!(cart.items[0].quantity, 7);

        assert!(cart.update_quantity(&ProductId::new("1"), i64::MAX));
        assert_eq!(cart.items[0].quantity, u32::MAX);

        assert!(!cart.update_quantity(&ProductId::new("missing"), 3));
    }

    #[test]
    fn test_update_to_zero_or_negative_removes() {
        let mut cart = CartState::default();
        cart.add_item(sticker("1", 499), 2);
        cart.add_item(sticker("2", 599), 2);

        assert!(cart.update_quantity(&ProductId::new("1"), 0));
        assert!(cart.update_quantity(&ProductId::new("2"), -5));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut cart = CartState::default();
        cart.add_item(sticker("1", 499), 1);
        assert!(!cart.remove_item(&ProductId::new("9")));
        assert_eq!(cart.unique_item_count(), 1);
    }

    #[test]
    fn test_clear_drops_coupon() {
        let mut cart = CartState::default();
        cart.add_item(sticker("1", 499), 1);
        assert!(cart.set_coupon(save10()));

        cart.clear();
        assert!(cart.is_empty());
        assert!(cart.applied_coupon.is_none());
    }

    #[test]
    fn test_emptying_cart_drops_coupon() {
        let mut cart = CartState::default();
        cart.add_item(sticker("1", 499), 1);
        cart.add_item(sticker("2", 599), 1);
        cart.set_coupon(save10());

        cart.remove_item(&ProductId::new("1"));
        assert!(cart.applied_coupon.is_some());

        cart.update_quantity(&ProductId::new("2"), 0);
        assert!(cart.applied_coupon.is_none());
    }

    #[test]
    fn test_coupon_requires_items() {
        let mut cart = CartState::default();
        assert!(!cart.set_coupon(save10()));
        assert!(cart.applied_coupon.is_none());

        let hydrated = CartState::new(Vec::new(), Some(save10()));
        assert!(hydrated.applied_coupon.is_none());
    }

    #[test]
    fn test_totals_follow_state() {
        let mut cart = CartState::default();
        cart.add_item(sticker("1", 499), 1);
        cart.set_coupon(save10());

        let totals = cart.totals();
        assert_eq!(totals.subtotal, Money::from_cents(499));
        assert_eq!(totals.discount, Money::from_cents(50));
        assert_eq!(totals.total, Money::from_cents(449));

        assert_eq!(cart.remove_coupon().map(|c| c.code), Some("SAVE10".to_string()));
        assert_eq!(cart.totals().total, Money::from_cents(499));
    }

    #[test]
    fn test_line_total() {
        let line = CartLine::new(sticker("3", 599), 6);
        assert_eq!(line.line_total(), Money::from_cents(3594));
    }
}
