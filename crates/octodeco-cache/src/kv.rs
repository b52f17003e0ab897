//! Typed wrapper over a key-value store with automatic serialization.

use crate::{CacheError, KvStore};
use serde::{de::DeserializeOwned, Serialize};

/// Type-safe cache over any [`KvStore`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
#[derive(Debug, Clone)]
pub struct Cache<S> {
    store: S,
}

impl<S: KvStore> Cache<S> {
    /// Wrap a backend.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the underlying backend.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the cache and return the backend.
    pub fn into_inner(self) -> S {
        self.store
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist and
    /// [`CacheError::SerializeError`] if the stored text is not a valid `T`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let lines: Option<Vec<CartLine>> = cache.get("octodeco-cart")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key)? {
            Some(text) => {
                let value: T = serde_json::from_str(&text)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Get the raw stored text.
    pub fn get_raw(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.store.get(key)
    }

    /// Set a value in the cache.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// cache.set("octodeco-cart", &lines)?;
    /// ```
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let text = serde_json::to_string(value)?;
        self.store.set(key, &text)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.store.exists(key)
    }
}

/// Helper to build cache keys with namespacing.
///
/// # Example
///
/// ```rust
/// let key = octodeco_cache::cache_key!("alice", "octodeco-cart");
/// assert_eq!(key, "alice:octodeco-cart");
/// ```
#[macro_export]
macro_rules! cache_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Item {
        name: String,
        quantity: u32,
    }

    #[test]
    fn test_typed_roundtrip() {
        let cache = Cache::new(MemoryStore::new());
        let items = vec![Item {
            name: "Dinotocat".into(),
            quantity: 2,
        }];
        cache.set("items", &items).unwrap();

        let loaded: Option<Vec<Item>> = cache.get("items").unwrap();
        assert_eq!(loaded.unwrap(), items);
    }

    #[test]
    fn test_missing_key() {
        let cache = Cache::new(MemoryStore::new());
        let loaded: Option<Vec<Item>> = cache.get("nothing").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_wrong_shape_is_serialize_error() {
        let store = MemoryStore::new();
        store.set("items", r#"{"not":"an array"}"#).unwrap();

        let cache = Cache::new(store);
        let result = cache.get::<Vec<Item>>("items");
        assert!(matches!(result, Err(CacheError::SerializeError(_))));
    }

    #[test]
    fn test_cache_key_macro() {
        assert_eq!(cache_key!("session", "abc", 7), "session:abc:7");
    }
}
