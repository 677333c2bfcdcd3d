//! Catalog backends.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use cartwheel_data::FetchClient;
use serde::Deserialize;

use crate::catalog::{Product, StockInfo};
use crate::error::CatalogError;
use crate::ids::ProductId;

/// Read access to product data and stock levels.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Current stock for a product.
    async fn stock(&self, product_id: ProductId) -> Result<StockInfo, CatalogError>;

    /// Display data for a product.
    async fn product(&self, product_id: ProductId) -> Result<Product, CatalogError>;
}

/// Body of `GET /stock/{id}`.
#[derive(Debug, Deserialize)]
struct StockResponse {
    amount: i64,
}

/// Catalog served over HTTP.
///
/// Queries `GET {base}/stock/{id}` and `GET {base}/products/{id}`.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: FetchClient,
}

impl HttpCatalog {
    /// Use a preconfigured client. Paths are resolved against its base URL.
    pub fn new(client: FetchClient) -> Self {
        Self { client }
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::new(
            FetchClient::new()
                .with_base_url(base_url)
                .with_default_header("Accept", "application/json"),
        )
    }

    async fn get_json<T: serde::de::DeserializeOwned + Send>(
        &self,
        path: String,
        product_id: ProductId,
    ) -> Result<T, CatalogError> {
        let response = self.client.get(path).send().await?;
        if response.status == 404 {
            return Err(CatalogError::NotFound(product_id));
        }
        Ok(response.error_for_status()?.json()?)
    }
}

#[async_trait]
impl Catalog for HttpCatalog {
    async fn stock(&self, product_id: ProductId) -> Result<StockInfo, CatalogError> {
        let body: StockResponse = self
            .get_json(format!("/stock/{}", product_id), product_id)
            .await?;
        Ok(StockInfo::new(product_id, body.amount))
    }

    async fn product(&self, product_id: ProductId) -> Result<Product, CatalogError> {
        self.get_json(format!("/products/{}", product_id), product_id)
            .await
    }
}

/// In-memory catalog for development and testing.
///
/// Products and stock levels are registered separately, so a product can
/// have stock but no display data and vice versa.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: RwLock<HashMap<ProductId, Product>>,
    stock: RwLock<HashMap<ProductId, i64>>,
    stock_queries: AtomicUsize,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a product with a stock level.
    pub fn with_product(self, product: Product, available: i64) -> Self {
        let id = product.id;
        self.insert_product(product);
        self.set_stock(id, available);
        self
    }

    pub fn insert_product(&self, product: Product) {
        if let Ok(mut products) = self.products.write() {
            products.insert(product.id, product);
        }
    }

    pub fn set_stock(&self, product_id: ProductId, available: i64) {
        if let Ok(mut stock) = self.stock.write() {
            stock.insert(product_id, available);
        }
    }

    /// Number of stock lookups served so far.
    pub fn stock_queries(&self) -> usize {
        self.stock_queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Catalog for InMemoryCatalog {
    async fn stock(&self, product_id: ProductId) -> Result<StockInfo, CatalogError> {
        self.stock_queries.fetch_add(1, Ordering::SeqCst);
        self.stock
            .read()
            .ok()
            .and_then(|stock| stock.get(&product_id).copied())
            .map(|available| StockInfo::new(product_id, available))
            .ok_or(CatalogError::NotFound(product_id))
    }

    async fn product(&self, product_id: ProductId) -> Result<Product, CatalogError> {
        self.products
            .read()
            .ok()
            .and_then(|products| products.get(&product_id).cloned())
            .ok_or(CatalogError::NotFound(product_id))
    }
}
