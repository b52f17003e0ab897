//! Local key-value storage for the Octodeco storefront.
//!
//! Provides a string-keyed backend abstraction ([`KvStore`]) with an
//! in-memory and a file-backed implementation, plus a typed [`Cache`]
//! wrapper that handles JSON serialization.
//!
//! # Example
//!
//! ```rust
//! use octodeco_cache::{Cache, MemoryStore};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Prefs {
//!     theme: String,
//! }
//!
//! let cache = Cache::new(MemoryStore::new());
//! cache.set("prefs", &Prefs { theme: "dark".into() }).unwrap();
//!
//! let prefs: Option<Prefs> = cache.get("prefs").unwrap();
//! assert_eq!(prefs.unwrap().theme, "dark");
//!
//! cache.delete("prefs").unwrap();
//! assert!(!cache.exists("prefs").unwrap());
//! ```

mod error;
mod kv;
mod store;

pub use error::CacheError;
pub use kv::Cache;
pub use store::{FileStore, KvStore, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KvStore, MemoryStore};
}
