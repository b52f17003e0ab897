//! Mirrors cart state into a key-value store.
//!
//! The adapter only reports failures. Deciding what to do about them (fall
//! back to an empty cart, log and keep going) is the cart store's job.

use crate::cart::{CartLine, CartState, Coupon, CouponRegistry};
use octodeco_cache::{cache_key, Cache, CacheError, KvStore};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, trace};

/// Key holding the JSON array of cart lines.
pub const CART_STORAGE_KEY: &str = "octodeco-cart";

/// Key holding the applied coupon, absent when none is applied.
pub const COUPON_STORAGE_KEY: &str = "octodeco-coupon";

/// Errors reading or writing persisted cart state.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// Stored text exists but is not the expected shape.
    #[error("Stored value under '{key}' is corrupt: {reason}")]
    Corrupt {
        /// Storage key.
        key: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The backend failed.
    #[error("Storage backend error: {0}")]
    Backend(#[from] CacheError),
}

/// Result of a [`CartPersistence::save`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Both keys were written.
    Written,
    /// Storage already holds this snapshot.
    Skipped,
}

/// What [`CartPersistence::load`] recovered.
#[derive(Debug)]
pub struct LoadedCart {
    /// Recovered state. A key that failed to load contributes its empty value.
    pub state: CartState,
    /// One entry per key that failed, cart key first.
    pub errors: Vec<PersistenceError>,
}

impl LoadedCart {
    /// Check if both keys loaded cleanly.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Stored form of the applied coupon.
///
/// Only `code` is trusted on load; the percent is re-read from the registry.
#[derive(Debug, Serialize, Deserialize)]
struct StoredCoupon {
    code: String,
    #[serde(default)]
    discount_percent: Option<u32>,
    #[serde(default)]
    description: Option<String>,
}

impl From<&Coupon> for StoredCoupon {
    fn from(coupon: &Coupon) -> Self {
        Self {
            code: coupon.code.clone(),
            discount_percent: Some(u32::from(coupon.discount_percent)),
            description: coupon.description.clone(),
        }
    }
}

/// Load/save adapter between [`CartState`] and a [`KvStore`].
#[derive(Debug)]
pub struct CartPersistence<S> {
    cache: Cache<S>,
    cart_key: String,
    coupon_key: String,
    last_synced: Option<CartState>,
}

impl<S: KvStore> CartPersistence<S> {
    /// Use the default keys.
    pub fn new(store: S) -> Self {
        Self {
            cache: Cache::new(store),
            cart_key: CART_STORAGE_KEY.to_string(),
            coupon_key: COUPON_STORAGE_KEY.to_string(),
            last_synced: None,
        }
    }

    /// Prefix both keys with `namespace`, e.g. `alice:octodeco-cart`.
    pub fn with_namespace(store: S, namespace: &str) -> Self {
        Self {
            cache: Cache::new(store),
            cart_key: cache_key!(namespace, CART_STORAGE_KEY),
            coupon_key: cache_key!(namespace, COUPON_STORAGE_KEY),
            last_synced: None,
        }
    }

    /// Key the cart lines are stored under.
    pub fn cart_key(&self) -> &str {
        &self.cart_key
    }

    /// Key the coupon is stored under.
    pub fn coupon_key(&self) -> &str {
        &self.coupon_key
    }

    /// Borrow the backend.
    pub fn store(&self) -> &S {
        self.cache.store()
    }

    /// Load the persisted lines.
    ///
    /// A missing key is an empty cart. Lines with quantity 0 or a negative
    /// price are dropped and duplicate product ids are merged, first
    /// occurrence wins the position.
    pub fn load_items(&self) -> Result<Vec<CartLine>, PersistenceError> {
        let Some(text) = self.cache.get_raw(&self.cart_key)? else {
            return Ok(Vec::new());
        };

        let value: serde_json::Value =
            serde_json::from_str(&text).map_err(|e| self.corrupt(&self.cart_key, e))?;
        if !value.is_array() {
            return Err(PersistenceError::Corrupt {
                key: self.cart_key.clone(),
                reason: "expected a JSON array".to_string(),
            });
        }
        let lines: Vec<CartLine> =
            serde_json::from_value(value).map_err(|e| self.corrupt(&self.cart_key, e))?;

        Ok(sanitize(lines))
    }

    /// Load the persisted coupon, re-validated against `registry`.
    ///
    /// A code the registry no longer knows loads as `None`.
    pub fn load_coupon(&self, registry: &CouponRegistry) -> Result<Option<Coupon>, PersistenceError> {
        let Some(text) = self.cache.get_raw(&self.coupon_key)? else {
            return Ok(None);
        };

        let stored: StoredCoupon =
            serde_json::from_str(&text).map_err(|e| self.corrupt(&self.coupon_key, e))?;
        let coupon = registry.validate(&stored.code);
        if coupon.is_none() {
            debug!(code = %stored.code, "Stored coupon is no longer valid");
        }
        Ok(coupon)
    }

    /// Load both keys, recovering each one independently.
    ///
    /// The state is only remembered as synced when both keys loaded, so a
    /// corrupt value is replaced by the next save.
    pub fn load(&mut self, registry: &CouponRegistry) -> LoadedCart {
        let mut errors = Vec::new();
        let items = self.load_items().unwrap_or_else(|e| {
            errors.push(e);
            Vec::new()
        });
        let coupon = self.load_coupon(registry).unwrap_or_else(|e| {
            errors.push(e);
            None
        });

        let state = CartState::new(items, coupon);
        if errors.is_empty() {
            self.mark_synced(&state);
        }
        LoadedCart { state, errors }
    }

    /// Write `state` unless storage already holds it.
    ///
    /// The remembered snapshot only advances when every write succeeds, so a
    /// failed save is retried by the next one.
    pub fn save(&mut self, state: &CartState) -> Result<SaveOutcome, PersistenceError> {
        if self.last_synced.as_ref() == Some(state) {
            trace!("Cart unchanged since last sync, skipping write");
            return Ok(SaveOutcome::Skipped);
        }

        self.cache.set(&self.cart_key, &state.items)?;
        match &state.applied_coupon {
            Some(coupon) => self.cache.set(&self.coupon_key, &StoredCoupon::from(coupon))?,
            None => self.cache.delete(&self.coupon_key)?,
        }

        self.mark_synced(state);
        debug!(lines = state.items.len(), "Cart written to storage");
        Ok(SaveOutcome::Written)
    }

    /// Record `state` as what storage currently holds.
    pub fn mark_synced(&mut self, state: &CartState) {
        self.last_synced = Some(state.clone());
    }

    fn corrupt(&self, key: &str, err: serde_json::Error) -> PersistenceError {
        PersistenceError::Corrupt {
            key: key.to_string(),
            reason: err.to_string(),
        }
    }
}

fn sanitize(lines: Vec<CartLine>) -> Vec<CartLine> {
    let mut merged: Vec<CartLine> = Vec::with_capacity(lines.len());
    let mut positions = HashMap::new();

    for line in lines {
        if line.quantity == 0 {
            continue;
        }
        if line.product.price.is_negative() {
            debug!(product_id = %line.product.id, "Dropping stored line with negative price");
            continue;
        }

        match positions.get(&line.product.id) {
            Some(&idx) => {
                let existing: &mut CartLine = &mut merged[idx];
                existing.quantity = existing.quantity.saturating_add(line.quantity);
            }
            None => {
                positions.insert(line.product.id.clone(), merged.len());
                merged.push(line);
            }
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use crate::money::Money;
    use octodeco_cache::MemoryStore;

    fn sticker(id: &str) -> Product {
        Product::new(id, format!("s{id}"), format!("Sticker {id}"), Money::from_cents(499))
    }

    fn state_with(id: &str, quantity: u32) -> CartState {
        let mut state = CartState::default();
        state.add_item(sticker(id), quantity);
        state
    }

    #[test]
    fn test_missing_keys_load_empty() {
        let mut persistence = CartPersistence::new(MemoryStore::new());
        let loaded = persistence.load(&CouponRegistry::builtin());
        assert!(loaded.is_clean());
        assert_eq!(loaded.state, CartState::default());
    }

    #[test]
    fn test_save_writes_both_keys() {
        let store = MemoryStore::new();
        let mut persistence = CartPersistence::new(store.clone());

        let mut state = state_with("1", 2);
        state.set_coupon(CouponRegistry::builtin().validate("SAVE15").unwrap());
        assert_eq!(persistence.save(&state).unwrap(), SaveOutcome::Written);

        let cart = store.get(CART_STORAGE_KEY).unwrap().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&cart).unwrap();
        assert_eq!(parsed[0]["quantity"], 2);
        assert_eq!(parsed[0]["product"]["id"], "1");

        let coupon = store.get(COUPON_STORAGE_KEY).unwrap().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&coupon).unwrap();
        assert_eq!(parsed["code"], "SAVE15");
        assert_eq!(parsed["discount_percent"], 15);
    }

    #[test]
    fn test_removing_coupon_deletes_key() {
        let store = MemoryStore::new();
        let mut persistence = CartPersistence::new(store.clone());

        let mut state = state_with("1", 1);
        state.set_coupon(CouponRegistry::builtin().validate("SAVE10").unwrap());
        persistence.save(&state).unwrap();
        assert!(store.exists(COUPON_STORAGE_KEY).unwrap());

        state.remove_coupon();
        persistence.save(&state).unwrap();
        assert!(!store.exists(COUPON_STORAGE_KEY).unwrap());
    }

    #[test]
    fn test_unchanged_snapshot_is_skipped() {
        let mut persistence = CartPersistence::new(MemoryStore::new());
        let state = state_with("1", 1);
        assert_eq!(persistence.save(&state).unwrap(), SaveOutcome::Written);
        assert_eq!(persistence.save(&state).unwrap(), SaveOutcome::Skipped);
    }

    #[test]
    fn test_loaded_snapshot_is_not_rewritten() {
        let store = MemoryStore::new();
        let mut first = CartPersistence::new(store.clone());
        first.save(&state_with("1", 1)).unwrap();

        let mut second = CartPersistence::new(store);
        let loaded = second.load(&CouponRegistry::builtin());
        assert_eq!(second.save(&loaded.state).unwrap(), SaveOutcome::Skipped);
    }

    #[test]
    fn test_corrupt_coupon_keeps_items() {
        let store = MemoryStore::new();
        let mut first = CartPersistence::new(store.clone());
        first.save(&state_with("1", 3)).unwrap();
        store.set(COUPON_STORAGE_KEY, "SAVE10").unwrap();

        let mut second = CartPersistence::new(store.clone());
        let loaded = second.load(&CouponRegistry::builtin());
        assert_eq!(loaded.errors.len(), 1);
        assert!(loaded.errors[0].to_string().contains(COUPON_STORAGE_KEY));
        assert_eq!(loaded.state, state_with("1", 3));

        // Not synced, so the same state is written back and the coupon key goes.
        assert_eq!(second.save(&loaded.state).unwrap(), SaveOutcome::Written);
        assert!(!store.exists(COUPON_STORAGE_KEY).unwrap());
        assert_eq!(second.load_items().unwrap().len(), 1);
    }

    #[test]
    fn test_corrupt_cart_keeps_nothing_synced() {
        let store = MemoryStore::new();
        store.set(CART_STORAGE_KEY, "garbage").unwrap();
        let mut persistence = CartPersistence::new(store);

        let loaded = persistence.load(&CouponRegistry::builtin());
        assert!(!loaded.is_clean());
        assert_eq!(loaded.state, CartState::default());
        assert_eq!(persistence.save(&loaded.state).unwrap(), SaveOutcome::Written);
    }

    #[test]
    fn test_non_array_is_corrupt() {
        let store = MemoryStore::new();
        store.set(CART_STORAGE_KEY, r#"{"items": []}"#).unwrap();
        let persistence = CartPersistence::new(store);
        assert!(matches!(
            persistence.load_items(),
            Err(PersistenceError::Corrupt { .. })
        ));
    }

    #[test]
    fn test_unparsable_is_corrupt() {
        let store = MemoryStore::new();
        store.set(CART_STORAGE_KEY, "[{not json").unwrap();
        let persistence = CartPersistence::new(store);
        let err = persistence.load_items().unwrap_err();
        assert!(err.to_string().contains(CART_STORAGE_KEY));
    }

    #[test]
    fn test_sanitize_merges_and_drops_zero() {
        let lines = vec![
            CartLine::new(sticker("1"), 1),
            CartLine::new(sticker("2"), 0),
            CartLine::new(sticker("3"), 2),
            CartLine::new(sticker("1"), 4),
        ];
        let cleaned = sanitize(lines);
        assert_eq!(cleaned.len(), 2);
        assert_eq!(cleaned[0].product.id.as_str(), "1");
        assert_eq!(cleaned[0].quantity, 5);
        assert_eq!(cleaned[1].product.id.as_str(), "3");
    }

    #[test]
    fn test_negative_price_lines_are_dropped() {
        let store = MemoryStore::new();
        store
            .set(
                CART_STORAGE_KEY,
                r#"[{"product":{"id":"9","slug":"bad","name":"Bad","price":-1000},"quantity":1},
                    {"product":{"id":"1","slug":"s1","name":"Sticker 1","price":499},"quantity":2}]"#,
            )
            .unwrap();
        let persistence = CartPersistence::new(store);

        let items = persistence.load_items().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product.id.as_str(), "1");
        assert_eq!(items[0].quantity, 2);
    }

    #[test]
    fn test_retired_coupon_loads_as_none() {
        let store = MemoryStore::new();
        store
            .set(COUPON_STORAGE_KEY, r#"{"code":"SPRING5","discount_percent":5}"#)
            .unwrap();
        let persistence = CartPersistence::new(store);
        assert!(persistence
            .load_coupon(&CouponRegistry::builtin())
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_stored_percent_is_not_trusted() {
        let store = MemoryStore::new();
        store
            .set(COUPON_STORAGE_KEY, r#"{"code":"save10","discount_percent":90}"#)
            .unwrap();
        let persistence = CartPersistence::new(store);
        let coupon = persistence
            .load_coupon(&CouponRegistry::builtin())
            .unwrap()
            .unwrap();
        assert_eq!(coupon.discount_percent, 10);
    }

    #[test]
    fn test_namespace_prefixes_keys() {
        let store = MemoryStore::new();
        let mut persistence = CartPersistence::with_namespace(store.clone(), "alice");
        assert_eq!(persistence.cart_key(), "alice:octodeco-cart");
        assert_eq!(persistence.coupon_key(), "alice:octodeco-coupon");

        persistence.save(&state_with("1", 1)).unwrap();
        assert!(store.exists("alice:octodeco-cart").unwrap());
        assert!(!store.exists(CART_STORAGE_KEY).unwrap());
    }
}
