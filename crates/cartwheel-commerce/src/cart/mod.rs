//! Shopping cart module.
//!
//! Contains the cart snapshot types and the [`CartStore`] that owns them.

mod entry;
mod store;

pub use entry::{CartEntry, CartSnapshot};
pub use store::{default_storage_key, CartStore, StoreConfig};
