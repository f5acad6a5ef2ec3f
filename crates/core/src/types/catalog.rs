//! Product catalog: a read-only product list with indexed id lookup.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// A purchasable item, immutable for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique catalog id.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Short description shown on product cards and sent to checkout.
    pub description: String,
    /// Price in minor currency units.
    pub price: Price,
    /// Grouping category (e.g. "digital", "merch").
    pub category: String,
    /// Whether the buyer may choose their own amount (e.g. donations).
    /// Displayed as a "+" price suffix; custom amounts are not collected.
    #[serde(default)]
    pub allows_custom_amount: bool,
}

/// Errors that can occur when building a [`Catalog`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum CatalogError {
    /// Two products share the same id.
    #[error("duplicate product id in catalog: {0}")]
    DuplicateId(ProductId),
}

/// An ordered, read-only collection of products with O(1) lookup by id.
///
/// The display order is the construction order. Lookup goes through an
/// id -> index map so the unknown-id failure path is a plain `None`
/// rather than a linear scan that callers might forget to check.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Build a catalog from a product list.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateId`] if two products share an id.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(products.len());
        for (position, product) in products.iter().enumerate() {
            if index.insert(product.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
        }
        Ok(Self { products, index })
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.index.get(id).and_then(|&position| self.products.get(position))
    }

    /// Whether the catalog contains the given id.
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.index.contains_key(id)
    }

    /// Iterate products in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}
