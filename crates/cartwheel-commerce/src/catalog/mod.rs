//! Catalog module.
//!
//! Product display data, stock levels, and the [`Catalog`] seam the cart
//! uses to query them.

mod inventory;
mod product;
mod source;

pub use inventory::StockInfo;
pub use product::Product;
pub use source::{Catalog, HttpCatalog, InMemoryCatalog};
