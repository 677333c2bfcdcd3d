//! Type-safe key-value storage layer for Cartwheel.
//!
//! Provides a small, ergonomic API for persisting data in a string
//! key-value store with automatic JSON serialization. Two backends ship
//! with the crate: [`MemoryStore`] and the file-backed [`FileStore`].
//!
//! # Example
//!
//! ```rust,ignore
//! use cartwheel_cache::{cache_key, Cache};
//!
//! let cache = Cache::open(".cartwheel/storage.json")?;
//! let key = cache_key!("cartwheel", "cart");
//!
//! // Store a value
//! cache.set(&key, &snapshot)?;
//!
//! // Retrieve a value
//! let snapshot: Option<CartSnapshot> = cache.get(&key)?;
//!
//! // Delete a value
//! cache.delete(&key)?;
//! ```

mod error;
mod kv;
mod store;

pub use error::CacheError;
pub use kv::Cache;
pub use store::{FileStore, KvStore, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{cache_key, Cache, CacheError, KvStore};
}
