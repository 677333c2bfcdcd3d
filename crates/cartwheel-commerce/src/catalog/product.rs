//! Product display data.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Product as returned by the product endpoint.
///
/// Only `id` matters to the cart. The display fields are carried through
/// untouched, and any fields the endpoint adds beyond these are preserved
/// in `extra` so a stored cart round-trips without loss.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    /// Image URL.
    #[serde(default)]
    pub image: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Product {
    pub fn new(id: ProductId, title: impl Into<String>, price: f64) -> Self {
        Self {
            id,
            title: title.into(),
            price,
            image: String::new(),
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Format the price as a dollar string.
    pub fn price_display(&self) -> String {
        format!("${:.2}", self.price)
    }
}
