//! Cart entries and snapshots.

use std::collections::HashSet;

use serde::{Deserialize, Serialize, Serializer};

use crate::catalog::Product;
use crate::error::CartError;
use crate::ids::ProductId;

/// One product line in the cart.
///
/// Serialized flat: the product object with an `amount` key added.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartEntry {
    #[serde(flatten)]
    pub product: Product,
    /// Quantity, always at least one.
    pub amount: i64,
}

impl CartEntry {
    pub fn new(mut product: Product, amount: i64) -> Self {
        // `amount` belongs to the entry; a stray product field would serialize twice.
        product.extra.remove("amount");
        Self { product, amount }
    }

    pub fn product_id(&self) -> ProductId {
        self.product.id
    }

    /// Price times amount.
    pub fn line_total(&self) -> f64 {
        self.product.price * self.amount as f64
    }
}

/// Immutable, ordered list of cart entries.
///
/// Insertion order is display order and no two entries share a product id.
/// Every change produces a new snapshot; the `with_*`/`without` methods
/// never touch `self`. Deserialization rejects lists that break either
/// invariant.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "Vec<CartEntry>")]
pub struct CartSnapshot {
    entries: Vec<CartEntry>,
}

impl CartSnapshot {
    /// An empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot, checking the invariants.
    pub fn from_entries(entries: Vec<CartEntry>) -> Result<Self, CartError> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if entry.amount < 1 {
                return Err(CartError::InvalidAmount(entry.amount));
            }
            if !seen.insert(entry.product_id()) {
                return Err(CartError::Generic(format!(
                    "Duplicate product in cart: {}",
                    entry.product_id()
                )));
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CartEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, product_id: ProductId) -> Option<&CartEntry> {
        self.entries.iter().find(|e| e.product_id() == product_id)
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.get(product_id).is_some()
    }

    /// Sum of amounts.
    pub fn item_count(&self) -> i64 {
        self.entries.iter().map(|e| e.amount).sum()
    }

    /// Sum of line totals.
    pub fn subtotal(&self) -> f64 {
        self.entries.iter().map(CartEntry::line_total).sum()
    }

    /// A new snapshot with `entry` appended, or `None` if its product is
    /// already present.
    pub fn with_appended(&self, entry: CartEntry) -> Option<Self> {
        if self.contains(entry.product_id()) {
            return None;
        }
        let mut entries = self.entries.clone();
        entries.push(entry);
        Some(Self { entries })
    }

    /// A new snapshot without the entry for `product_id`. Order of the
    /// remaining entries is kept; if nothing matched the result equals `self`.
    pub fn without(&self, product_id: ProductId) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|e| e.product_id() != product_id)
                .cloned()
                .collect(),
        }
    }

    /// A new snapshot with one entry's amount replaced, or `None` if the
    /// product is absent. Does not validate `amount`.
    pub fn with_amount(&self, product_id: ProductId, amount: i64) -> Option<Self> {
        let index = self
            .entries
            .iter()
            .position(|e| e.product_id() == product_id)?;
        let mut entries = self.entries.clone();
        if let Some(entry) = entries.get_mut(index) {
            entry.amount = amount;
        }
        Some(Self { entries })
    }
}

impl TryFrom<Vec<CartEntry>> for CartSnapshot {
    type Error = CartError;

    fn try_from(entries: Vec<CartEntry>) -> Result<Self, Self::Error> {
        Self::from_entries(entries)
    }
}

impl Serialize for CartSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

impl<'a> IntoIterator for &'a CartSnapshot {
    type Item = &'a CartEntry;
    type IntoIter = std::slice::Iter<'a, CartEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: u64, amount: i64) -> CartEntry {
        CartEntry::new(
            Product::new(ProductId::new(id), format!("Shoe {}", id), 100.0),
            amount,
        )
    }

    fn snapshot(lines: &[(u64, i64)]) -> CartSnapshot {
        CartSnapshot::from_entries(lines.iter().map(|&(id, a)| entry(id, a)).collect()).unwrap()
    }

    fn ids(snapshot: &CartSnapshot) -> Vec<u64> {
        snapshot.iter().map(|e| e.product_id().get()).collect()
    }

    #[test]
    fn test_entry_serializes_flat() {
        let json = serde_json::to_value(entry(1, 2)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 1, "title": "Shoe 1", "price": 100.0, "image": "", "amount": 2})
        );
    }

    #[test]
    fn test_entry_new_drops_product_amount_field() {
        let mut product = Product::new(ProductId::new(1), "Shoe", 1.0);
        product.extra.insert("amount".into(), serde_json::json!(99));
        let entry = CartEntry::new(product, 1);
        assert!(entry.product.extra.is_empty());
    }

    #[test]
    fn test_entry_decodes_stored_shape() {
        let stored = r#"{"id": 3, "title": "Boot", "price": 219.9, "image": "boot.jpg", "amount": 2}"#;
        let entry: CartEntry = serde_json::from_str(stored).unwrap();
        assert_eq!(entry.product_id(), ProductId::new(3));
        assert_eq!(entry.amount, 2);
        assert!(entry.product.extra.is_empty());
    }

    #[test]
    fn test_totals() {
        let cart = snapshot(&[(1, 2), (2, 1)]);
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.subtotal(), 300.0);
    }

    #[test]
    fn test_with_appended_keeps_order_and_original() {
        let cart = snapshot(&[(1, 1)]);
        let next = cart.with_appended(entry(2, 1)).unwrap();
        assert_eq!(ids(&next), vec![1, 2]);
        assert_eq!(ids(&cart), vec![1]);
    }

    #[test]
    fn test_with_appended_rejects_duplicate() {
        let cart = snapshot(&[(1, 1)]);
        assert!(cart.with_appended(entry(1, 1)).is_none());
    }

    #[test]
    fn test_without() {
        let cart = snapshot(&[(1, 1), (2, 2), (3, 3)]);
        let next = cart.without(ProductId::new(2));
        assert_eq!(ids(&next), vec![1, 3]);
        assert_eq!(cart.without(ProductId::new(9)), cart);
    }

    #[test]
    fn test_with_amount() {
        let cart = snapshot(&[(1, 1), (2, 2)]);
        let next = cart.with_amount(ProductId::new(2), 5).unwrap();
        assert_eq!(next.get(ProductId::new(2)).unwrap().amount, 5);
        assert_eq!(next.get(ProductId::new(1)), cart.get(ProductId::new(1)));
        assert_eq!(cart.get(ProductId::new(2)).unwrap().amount, 2);
        assert!(cart.with_amount(ProductId::new(9), 1).is_none());
    }

    #[test]
    fn test_deserialize_rejects_duplicates() {
        let stored = r#"[
            {"id": 1, "title": "a", "price": 1, "image": "", "amount": 1},
            {"id": 1, "title": "a", "price": 1, "image": "", "amount": 2}
        ]"#;
        assert!(serde_json::from_str::<CartSnapshot>(stored).is_err());
    }

    #[test]
    fn test_deserialize_rejects_zero_amount() {
        let stored = r#"[{"id": 1, "title": "a", "price": 1, "image": "", "amount": 0}]"#;
        assert!(serde_json::from_str::<CartSnapshot>(stored).is_err());
    }

    #[test]
    fn test_serializes_as_array() {
        let json = serde_json::to_string(&CartSnapshot::new()).unwrap();
        assert_eq!(json, "[]");
    }
}
