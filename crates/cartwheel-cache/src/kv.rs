//! Typed cache over a key-value backend.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};

use crate::store::{FileStore, KvStore, MemoryStore};
use crate::CacheError;

/// Type-safe cache with automatic JSON serialization.
///
/// Cloning is cheap; clones share the same backend.
#[derive(Clone)]
pub struct Cache {
    store: Arc<dyn KvStore>,
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache").finish_non_exhaustive()
    }
}

impl Cache {
    /// Wrap an existing backend.
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Cache backed by a fresh [`MemoryStore`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Open a cache persisted to a JSON file.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cache = Cache::open(".cartwheel/storage.json")?;
    /// ```
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CacheError> {
        Ok(Self::new(Arc::new(FileStore::open(path)?)))
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist, and an error if the stored
    /// value does not decode as `T`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cart: Option<CartSnapshot> = cache.get("cartwheel:cart")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Get the raw stored string.
    pub fn get_raw(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.store.get(key)
    }

    /// Serialize and store a value.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, &raw)
    }

    /// Store a raw string as-is.
    pub fn set_raw(&self, key: &str, raw: &str) -> Result<(), CacheError> {
        self.store.set(key, raw)
    }

    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.delete(key)
    }

    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.store.exists(key)
    }

    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.store.keys()
    }
}

/// Helper to build cache keys with namespacing.
///
/// # Example
///
/// ```rust,ignore
/// let key = cache_key!("cartwheel", "cart");
/// // Returns "cartwheel:cart"
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
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Line {
        id: u64,
        amount: i64,
    }

    #[test]
    fn test_typed_roundtrip() {
        let cache = Cache::in_memory();
        let lines = vec![Line { id: 2, amount: 1 }, Line { id: 1, amount: 3 }];

        cache.set("cart", &lines).unwrap();
        let loaded: Vec<Line> = cache.get("cart").unwrap().unwrap();
        assert_eq!(loaded, lines);
        assert_eq!(
            cache.get_raw("cart").unwrap().as_deref(),
            Some(r#"[{"id":2,"amount":1},{"id":1,"amount":3}]"#)
        );
    }

    #[test]
    fn test_get_missing() {
        let cache = Cache::in_memory();
        let loaded: Option<Vec<Line>> = cache.get("cart").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_get_undecodable_value() {
        let cache = Cache::in_memory();
        cache.set_raw("cart", "{broken").unwrap();
        let result: Result<Option<Vec<Line>>, _> = cache.get("cart");
        assert!(matches!(result, Err(CacheError::SerializeError(_))));
    }

    #[test]
    fn test_clones_share_backend() {
        let cache = Cache::in_memory();
        let other = cache.clone();
        cache.set("k", &1).unwrap();
        assert!(other.exists("k").unwrap());
        other.delete("k").unwrap();
        assert!(cache.keys().unwrap().is_empty());
    }

    #[test]
    fn test_cache_key_macro() {
        assert_eq!(cache_key!("cartwheel", "cart"), "cartwheel:cart");
        assert_eq!(cache_key!("cartwheel", "cart", 42), "cartwheel:cart:42");
    }
}
