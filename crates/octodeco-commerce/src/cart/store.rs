//! The cart store: one session's cart, its coupon and its persistence.

use crate::cart::{
    CartLine, CartPersistence, CartState, CartSummary, CartTotals, Coupon, CouponRegistry,
    CouponResult,
};
use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::Money;
use octodeco_cache::KvStore;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Where a [`CartStore`] is in its startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifecycle {
    /// Constructed, storage not read yet.
    Uninitialized,
    /// Reading storage.
    Loading,
    /// Hydrated; reads reflect persisted state.
    Ready,
}

/// Owns the cart state for a single session.
///
/// Mutators take `&mut self`, run synchronously and write through to storage
/// before returning. Storage failures never reach the caller: load errors
/// fall back to an empty cart, write errors leave memory as the source of
/// truth. Both are logged at `warn`.
///
/// ```
/// use octodeco_cache::MemoryStore;
/// use octodeco_commerce::cart::CartStore;
/// use octodeco_commerce::catalog::Catalog;
///
/// let catalog = Catalog::builtin();
/// let mut cart = CartStore::open_in(MemoryStore::new());
/// let sticker = catalog.get(&"1".into()).unwrap().clone();
///
/// cart.add_item(sticker, 1);
/// let result = cart.apply_coupon("save10");
/// assert!(result.success);
/// assert_eq!(cart.total().display(), "$4.49");
/// ```
#[derive(Debug)]
pub struct CartStore<S> {
    state: CartState,
    registry: CouponRegistry,
    persistence: CartPersistence<S>,
    lifecycle: Lifecycle,
}

impl<S: KvStore> CartStore<S> {
    /// Create an unhydrated store. Reads return the empty cart until
    /// [`hydrate`](Self::hydrate) runs or the first mutation.
    pub fn new(persistence: CartPersistence<S>, registry: CouponRegistry) -> Self {
        Self {
            state: CartState::default(),
            registry,
            persistence,
            lifecycle: Lifecycle::Uninitialized,
        }
    }

    /// Create and hydrate.
    pub fn open(persistence: CartPersistence<S>, registry: CouponRegistry) -> Self {
        let mut store = Self::new(persistence, registry);
        store.hydrate();
        store
    }

    /// Create and hydrate over `backend` with the default keys and the
    /// built-in coupons.
    pub fn open_in(backend: S) -> Self {
        Self::open(CartPersistence::new(backend), CouponRegistry::builtin())
    }

    /// Read persisted state into memory.
    ///
    /// Runs once; later calls are no-ops. A corrupt or unreadable key loads
    /// as its empty value without affecting the other key.
    pub fn hydrate(&mut self) {
        if self.lifecycle != Lifecycle::Uninitialized {
            return;
        }
        self.lifecycle = Lifecycle::Loading;

        let loaded = self.persistence.load(&self.registry);
        for e in &loaded.errors {
            warn!(error = %e, "Failed to load stored cart value, using empty value");
        }
        self.state = loaded.state;

        self.lifecycle = Lifecycle::Ready;
        info!(
            lines = self.state.items.len(),
            coupon = self.state.applied_coupon.as_ref().map(|c| c.code.as_str()),
            "Cart hydrated"
        );
    }

    fn ensure_hydrated(&mut self) {
        if self.lifecycle == Lifecycle::Uninitialized {
            self.hydrate();
        }
    }

    fn persist(&mut self) {
        if let Err(e) = self.persistence.save(&self.state) {
            warn!(error = %e, "Failed to save cart, keeping in-memory state");
        }
    }

    // ----- mutators -----

    /// Add `quantity` of `product`, merging with an existing line.
    ///
    /// Returns false for a zero quantity.
    pub fn add_item(&mut self, product: Product, quantity: u32) -> bool {
        self.ensure_hydrated();
        let product_id = product.id.clone();
        let changed = self.state.add_item(product, quantity);
        if changed {
            debug!(product_id = %product_id, quantity, "Added to cart");
        }
        self.persist();
        changed
    }

    /// Add a single `product`.
    pub fn add_one(&mut self, product: Product) -> bool {
        self.add_item(product, 1)
    }

    /// Remove the line for `product_id`; no-op if absent.
    pub fn remove_item(&mut self, product_id: &ProductId) -> bool {
        self.ensure_hydrated();
        let changed = self.state.remove_item(product_id);
        if changed {
            debug!(product_id = %product_id, "Removed from cart");
        }
        self.persist();
        changed
    }

    /// Set a line's quantity. Zero or less removes it.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) -> bool {
        self.ensure_hydrated();
        let changed = self.state.update_quantity(product_id, quantity);
        if changed {
            debug!(product_id = %product_id, quantity, "Updated cart quantity");
        }
        self.persist();
        changed
    }

    /// Empty the cart and drop the coupon.
    pub fn clear_cart(&mut self) {
        self.ensure_hydrated();
        self.state.clear();
        debug!("Cart cleared");
        self.persist();
    }

    /// Validate `code` and apply it, replacing any previous coupon.
    ///
    /// On failure the state is unchanged.
    pub fn apply_coupon(&mut self, code: &str) -> CouponResult {
        self.ensure_hydrated();

        let Some(coupon) = self.registry.validate(code) else {
            debug!(code, "Rejected coupon code");
            return CouponResult::invalid();
        };
        if !self.state.set_coupon(coupon.clone()) {
            debug!(code = %coupon.code, "Rejected coupon for empty cart");
            return CouponResult::empty_cart();
        }

        info!(code = %coupon.code, percent = coupon.discount_percent, "Coupon applied");
        self.persist();
        CouponResult::applied(&coupon)
    }

    /// Drop the applied coupon; no-op if none.
    pub fn remove_coupon(&mut self) -> Option<Coupon> {
        self.ensure_hydrated();
        let removed = self.state.remove_coupon();
        if let Some(coupon) = &removed {
            info!(code = %coupon.code, "Coupon removed");
        }
        self.persist();
        removed
    }

    // ----- readers -----

    /// Lines in insertion order.
    pub fn items(&self) -> &[CartLine] {
        &self.state.items
    }

    /// Sum of quantities.
    pub fn item_count(&self) -> u64 {
        self.state.item_count()
    }

    /// Sum of price x quantity.
    pub fn subtotal(&self) -> Money {
        self.totals().subtotal
    }

    /// Coupon discount.
    pub fn discount(&self) -> Money {
        self.totals().discount
    }

    /// Subtotal minus discount.
    pub fn total(&self) -> Money {
        self.totals().total
    }

    /// A coupon is applied and the discounted total reaches the threshold.
    pub fn qualifies_for_free_shipping(&self) -> bool {
        self.totals().qualifies_for_free_shipping
    }

    /// The applied coupon.
    pub fn applied_coupon(&self) -> Option<&Coupon> {
        self.state.applied_coupon.as_ref()
    }

    /// Every derived value at once.
    pub fn totals(&self) -> CartTotals {
        self.state.totals()
    }

    /// Serializable snapshot.
    pub fn summary(&self) -> CartSummary {
        self.state.summary()
    }

    /// Current state.
    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// Check if hydration has completed.
    pub fn is_loaded(&self) -> bool {
        self.lifecycle == Lifecycle::Ready
    }

    /// Current lifecycle stage.
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Coupon registry used for validation.
    pub fn registry(&self) -> &CouponRegistry {
        &self.registry
    }

    /// Persistence adapter.
    pub fn persistence(&self) -> &CartPersistence<S> {
        &self.persistence
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{CART_STORAGE_KEY, COUPON_STORAGE_KEY};
    use crate::catalog::Catalog;
    use octodeco_cache::MemoryStore;

    fn product(id: &str) -> Product {
        Catalog::builtin().get(&ProductId::new(id)).unwrap().clone()
    }

    #[test]
    fn test_lifecycle() {
        let mut cart = CartStore::new(
            CartPersistence::new(MemoryStore::new()),
            CouponRegistry::builtin(),
        );
        assert_eq!(cart.lifecycle(), Lifecycle::Uninitialized);
        assert!(!cart.is_loaded());

        cart.hydrate();
        assert_eq!(cart.lifecycle(), Lifecycle::Ready);
        assert!(cart.is_loaded());
    }

    #[test]
    fn test_mutation_before_hydrate_keeps_persisted_lines() {
        let backend = MemoryStore::new();
        let mut first = CartStore::open_in(backend.clone());
        first.add_item(product("1"), 2);

        let mut second = CartStore::new(CartPersistence::new(backend), CouponRegistry::builtin());
        assert!(second.items().is_empty());
        second.add_item(product("2"), 1);

        assert!(second.is_loaded());
        assert_eq!(second.items().len(), 2);
        assert_eq!(second.item_count(), 3);
    }

    #[test]
    fn test_add_one() {
        let mut cart = CartStore::open_in(MemoryStore::new());
        assert!(cart.add_one(product("1")));
        assert!(cart.add_one(product("1")));
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_apply_coupon_messages() {
        let mut cart = CartStore::open_in(MemoryStore::new());
        let empty = cart.apply_coupon("SAVE10");
        assert!(!empty.success);
        assert_eq!(empty.message, "Add items to your cart before applying a coupon");

        cart.add_item(product("1"), 1);
        let ok = cart.apply_coupon("save10");
        assert!(ok.success);
        assert_eq!(ok.message, "Coupon applied: 10% off");

        let bad = cart.apply_coupon("bogus");
        assert!(!bad.success);
        assert_eq!(bad.message, "Invalid coupon code");
        assert_eq!(cart.applied_coupon().unwrap().code, "SAVE10");
    }

    #[test]
    fn test_apply_replaces_previous_coupon() {
        let mut cart = CartStore::open_in(MemoryStore::new());
        cart.add_item(product("1"), 1);
        cart.apply_coupon("SAVE10");
        cart.apply_coupon("WELCOME25");
        assert_eq!(cart.applied_coupon().unwrap().discount_percent, 25);
    }

    #[test]
    fn test_clear_removes_both_keys_content() {
        let backend = MemoryStore::new();
        let mut cart = CartStore::open_in(backend.clone());
        cart.add_item(product("1"), 1);
        cart.apply_coupon("SAVE20");

        cart.clear_cart();
        assert_eq!(backend.get(CART_STORAGE_KEY).unwrap().as_deref(), Some("[]"));
        assert!(!backend.exists(COUPON_STORAGE_KEY).unwrap());
    }

    #[test]
    fn test_remove_coupon() {
        let mut cart = CartStore::open_in(MemoryStore::new());
        cart.add_item(product("1"), 1);
        assert!(cart.remove_coupon().is_none());

        cart.apply_coupon("SAVE10");
        assert_eq!(cart.remove_coupon().unwrap().code, "SAVE10");
        assert!(cart.discount().is_zero());
    }

    #[test]
    fn test_readers_agree_with_totals() {
        let mut cart = CartStore::open_in(MemoryStore::new());
        cart.add_item(product("3"), 6);
        cart.apply_coupon("SAVE20");

        let totals = cart.totals();
        assert_eq!(cart.subtotal(), totals.subtotal);
        assert_eq!(cart.discount(), totals.discount);
        assert_eq!(cart.total(), totals.total);
        assert_eq!(cart.qualifies_for_free_shipping(), totals.qualifies_for_free_shipping);
        assert_eq!(cart.summary().totals, totals);
    }
}
