//! Cart state and catalog types for Cartwheel.
//!
//! - **Catalog**: product display data, stock levels, and the [`Catalog`]
//!   trait with HTTP and in-memory backends
//! - **Cart**: immutable [`CartSnapshot`]s and the [`CartStore`] that adds,
//!   removes and re-quantifies entries against live stock
//! - **Notify**: the [`Notifier`] sink rejected changes are reported to
//!
//! # Example
//!
//! ```rust,ignore
//! use cartwheel_commerce::prelude::*;
//! use cartwheel_cache::Cache;
//! use std::sync::Arc;
//!
//! let store = CartStore::new(
//!     HttpCatalog::with_base_url("http://localhost:3333"),
//!     Cache::open(".cartwheel/storage.json")?,
//!     Arc::new(TracingNotifier),
//! );
//!
//! store.add(ProductId::new(1)).await.ok();
//! store.add(ProductId::new(1)).await.ok();
//! store.remove(ProductId::new(2)).await.ok();
//!
//! for entry in store.cart().iter() {
//!     println!("{} x{}", entry.product.title, entry.amount);
//! }
//! ```

pub mod error;
pub mod ids;
pub mod notify;

pub mod cart;
pub mod catalog;

pub use cart::{CartEntry, CartSnapshot, CartStore, StoreConfig};
pub use catalog::{Catalog, HttpCatalog, InMemoryCatalog, Product, StockInfo};
pub use error::{CartError, CatalogError};
pub use ids::ProductId;
pub use notify::{Notification, Notifier, Severity};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{CartError, CatalogError};
    pub use crate::ids::ProductId;

    // Catalog
    pub use crate::catalog::{Catalog, HttpCatalog, InMemoryCatalog, Product, StockInfo};

    // Cart
    pub use crate::cart::{CartEntry, CartSnapshot, CartStore, StoreConfig};

    // Notify
    pub use crate::notify::{
        CartOp, Notification, Notifier, RecordingNotifier, Severity, TracingNotifier,
    };
}
