//! The cart store.

use std::sync::Arc;

use cartwheel_cache::{cache_key, Cache};
use tokio::sync::{watch, Mutex};
use tracing::instrument;

use crate::cart::{CartEntry, CartSnapshot};
use crate::catalog::Catalog;
use crate::error::CartError;
use crate::ids::ProductId;
use crate::notify::{CartOp, Notification, Notifier};

/// Store settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Storage key the snapshot is persisted under.
    pub storage_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
        }
    }
}

/// The key used when no other is configured: `cartwheel:cart`.
pub fn default_storage_key() -> String {
    cache_key!("cartwheel", "cart")
}

/// Client-side cart state.
///
/// Holds the current [`CartSnapshot`], validates quantity increases against
/// the catalog's stock, persists every accepted change and publishes it to
/// subscribers.
///
/// Mutations are serialized: each one runs to completion, including its
/// catalog lookups, before the next starts. Reads never wait on them.
///
/// Rejected mutations are reported to the [`Notifier`] and leave the cart
/// untouched. The returned `Result` repeats the outcome for callers that
/// want it; ignoring it is fine.
///
/// # Example
///
/// ```rust,ignore
/// let store = CartStore::new(
///     HttpCatalog::with_base_url("http://localhost:3333"),
///     Cache::open(".cartwheel/storage.json")?,
///     Arc::new(TracingNotifier),
/// );
///
/// let mut updates = store.subscribe();
/// store.add(ProductId::new(1)).await.ok();
/// store.set_quantity(ProductId::new(1), 3).await.ok();
/// println!("{} items", updates.borrow_and_update().item_count());
/// ```
pub struct CartStore<C: Catalog> {
    catalog: C,
    cache: Cache,
    notifier: Arc<dyn Notifier>,
    storage_key: String,
    state: watch::Sender<Arc<CartSnapshot>>,
    write_lock: Mutex<()>,
}

impl<C: Catalog> CartStore<C> {
    /// Create a store with the default storage key, hydrating from `cache`.
    pub fn new(catalog: C, cache: Cache, notifier: Arc<dyn Notifier>) -> Self {
        Self::with_config(catalog, cache, notifier, StoreConfig::default())
    }

    /// Create a store, hydrating from `cache` under `config.storage_key`.
    pub fn with_config(
        catalog: C,
        cache: Cache,
        notifier: Arc<dyn Notifier>,
        config: StoreConfig,
    ) -> Self {
        let initial = hydrate(&cache, &config.storage_key);
        let (state, _) = watch::channel(Arc::new(initial));
        Self {
            catalog,
            cache,
            notifier,
            storage_key: config.storage_key,
            state,
            write_lock: Mutex::new(()),
        }
    }

    /// The current snapshot.
    pub fn cart(&self) -> Arc<CartSnapshot> {
        self.state.borrow().clone()
    }

    /// Receive every snapshot published after this call.
    pub fn subscribe(&self) -> watch::Receiver<Arc<CartSnapshot>> {
        self.state.subscribe()
    }

    /// The catalog stock and product data come from.
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Key the snapshot is persisted under.
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Add one unit of a product.
    ///
    /// A product already in the cart goes through
    /// [`set_quantity`](Self::set_quantity) with its amount plus one, and
    /// failures are reported as quantity updates. A new product needs
    /// positive stock; it is appended with amount 1.
    #[instrument(skip_all, fields(product_id = %product_id))]
    pub async fn add(&self, product_id: ProductId) -> Result<Arc<CartSnapshot>, CartError> {
        let _guard = self.write_lock.lock().await;
        let current = self.cart();

        if let Some(existing) = current.get(product_id) {
            let amount = existing.amount.saturating_add(1);
            let next = self.next_with_amount(&current, product_id, amount).await;
            return self.finish(CartOp::SetQuantity, next);
        }

        let next = self.next_with_new_product(&current, product_id).await;
        self.finish(CartOp::Add, next)
    }

    /// Remove a product's entry entirely.
    #[instrument(skip_all, fields(product_id = %product_id))]
    pub async fn remove(&self, product_id: ProductId) -> Result<Arc<CartSnapshot>, CartError> {
        let _guard = self.write_lock.lock().await;
        let current = self.cart();

        let next = current.without(product_id);
        let next = if next.len() == current.len() {
            Err(CartError::NotFound(product_id))
        } else {
            Ok(next)
        };
        self.finish(CartOp::Remove, next)
    }

    /// Set a product's amount.
    ///
    /// `amount` must be at least 1; use [`remove`](Self::remove) to drop an
    /// entry. Stock is only checked when the amount goes up.
    #[instrument(skip_all, fields(product_id = %product_id, amount = amount))]
    pub async fn set_quantity(
        &self,
        product_id: ProductId,
        amount: i64,
    ) -> Result<Arc<CartSnapshot>, CartError> {
        let _guard = self.write_lock.lock().await;
        let current = self.cart();

        let next = self.next_with_amount(&current, product_id, amount).await;
        self.finish(CartOp::SetQuantity, next)
    }

    async fn next_with_new_product(
        &self,
        current: &CartSnapshot,
        product_id: ProductId,
    ) -> Result<CartSnapshot, CartError> {
        let stock = self.catalog.stock(product_id).await?;
        if stock.is_out_of_stock() {
            return Err(CartError::OutOfStock {
                product_id,
                requested: 1,
                available: stock.available,
            });
        }

        let product = self.catalog.product(product_id).await?;
        if product.id != product_id {
            return Err(CartError::Generic(format!(
                "Catalog returned product {} for {}",
                product.id, product_id
            )));
        }

        current
            .with_appended(CartEntry::new(product, 1))
            .ok_or_else(|| CartError::Generic(format!("Product {} already in cart", product_id)))
    }

    async fn next_with_amount(
        &self,
        current: &CartSnapshot,
        product_id: ProductId,
        amount: i64,
    ) -> Result<CartSnapshot, CartError> {
        if amount < 1 {
            return Err(CartError::InvalidAmount(amount));
        }

        let entry = current
            .get(product_id)
            .ok_or(CartError::NotFound(product_id))?;

        if amount > entry.amount {
            let stock = self.catalog.stock(product_id).await?;
            if !stock.can_fulfill(amount) {
                return Err(CartError::OutOfStock {
                    product_id,
                    requested: amount,
                    available: stock.available,
                });
            }
        }

        current
            .with_amount(product_id, amount)
            .ok_or(CartError::NotFound(product_id))
    }

    /// Commit an accepted snapshot or report a rejection.
    fn finish(
        &self,
        op: CartOp,
        next: Result<CartSnapshot, CartError>,
    ) -> Result<Arc<CartSnapshot>, CartError> {
        let result = next.and_then(|snapshot| self.commit(snapshot));
        if let Err(err) = &result {
            tracing::warn!(op = op.as_str(), error = %err, "cart change rejected");
            self.notifier.notify(Notification::for_failure(op, err));
        }
        result
    }

    /// Persist, then publish. A failed write publishes nothing.
    fn commit(&self, snapshot: CartSnapshot) -> Result<Arc<CartSnapshot>, CartError> {
        self.cache.set(&self.storage_key, &snapshot)?;

        let snapshot = Arc::new(snapshot);
        self.state.send_replace(Arc::clone(&snapshot));
        tracing::info!(
            entries = snapshot.len(),
            items = snapshot.item_count(),
            "cart updated"
        );
        Ok(snapshot)
    }
}

/// Load the persisted snapshot; anything unusable yields an empty cart.
fn hydrate(cache: &Cache, key: &str) -> CartSnapshot {
    match cache.get::<CartSnapshot>(key) {
        Ok(Some(snapshot)) => {
            tracing::debug!(key, entries = snapshot.len(), "hydrated cart from storage");
            snapshot
        }
        Ok(None) => CartSnapshot::new(),
        Err(e) => {
            tracing::warn!(key, error = %e, "ignoring unreadable stored cart");
            CartSnapshot::new()
        }
    }
}
