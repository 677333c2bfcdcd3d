//! Commerce error types.

use cartwheel_cache::CacheError;
use cartwheel_data::FetchError;
use thiserror::Error;

use crate::ids::ProductId;

/// Errors from a [`Catalog`](crate::catalog::Catalog) lookup.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog has no such product.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// The request to the catalog failed.
    #[error("Catalog request failed: {0}")]
    Fetch(#[from] FetchError),
}

/// Reasons a cart mutation is rejected.
///
/// Every variant leaves the cart unchanged.
#[derive(Error, Debug)]
pub enum CartError {
    /// Requested quantity exceeds reported stock.
    #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
    OutOfStock {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },

    /// The product is not in the cart.
    #[error("Product not in cart: {0}")]
    NotFound(ProductId),

    /// Quantity below one.
    #[error("Invalid quantity: {0}")]
    InvalidAmount(i64),

    /// Network, storage or other unexpected failure.
    #[error("{0}")]
    Generic(String),
}

impl From<CatalogError> for CartError {
    fn from(e: CatalogError) -> Self {
        CartError::Generic(e.to_string())
    }
}

impl From<CacheError> for CartError {
    fn from(e: CacheError) -> Self {
        CartError::Generic(format!("Storage error: {}", e))
    }
}
