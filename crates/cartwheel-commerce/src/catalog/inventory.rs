//! Stock levels.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Availability reported by the stock endpoint at the moment of the query.
///
/// Never cached; every check fetches a fresh value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockInfo {
    pub product_id: ProductId,
    /// Units available. Negative values from a misbehaving endpoint are
    /// treated as zero by the checks below.
    pub available: i64,
}

impl StockInfo {
    pub fn new(product_id: ProductId, available: i64) -> Self {
        Self {
            product_id,
            available,
        }
    }

    pub fn is_out_of_stock(&self) -> bool {
        self.available <= 0
    }

    /// Check if a specific quantity is available.
    pub fn can_fulfill(&self, quantity: i64) -> bool {
        self.available >= quantity
    }
}
