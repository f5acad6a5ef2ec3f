//! The cart store: cart mutations validated against the catalog and
//! persisted after every change.

use std::sync::Arc;

use corner_shop_core::{Cart, Catalog, LineItem, Price, ProductId};
use thiserror::Error;

use crate::storage::{KEY_CART_STATE, KeyValueStore};

/// Error for cart operations referencing an id the catalog does not have.
///
/// This is a programmer error (the UI only offers catalog products), so
/// callers log it and no-op rather than surface a failure page.
#[derive(Debug, Clone, Error)]
#[error("unknown product id: {0}")]
pub struct UnknownProduct(pub ProductId);

/// Mutable cart state backed by durable key-value storage.
///
/// All mutations go through the defined operations; each one persists the
/// resulting cart under [`KEY_CART_STATE`] before returning.
pub struct CartStore {
    cart: Cart,
    catalog: Arc<Catalog>,
    storage: Arc<dyn KeyValueStore>,
}

impl CartStore {
    /// Restore a cart store from durable storage.
    ///
    /// A missing key starts an empty cart. A present-but-undecodable value
    /// also starts empty with a warning; a stale tutorial cart is not
    /// worth failing startup over.
    #[must_use]
    pub fn restore(catalog: Arc<Catalog>, storage: Arc<dyn KeyValueStore>) -> Self {
        let cart = match storage.get(KEY_CART_STATE) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "stored cart undecodable, resetting to empty");
                Cart::new()
            }),
            Ok(None) => Cart::new(),
            Err(e) => {
                tracing::warn!(error = %e, "cart state unreadable, resetting to empty");
                Cart::new()
            }
        };

        Self {
            cart,
            catalog,
            storage,
        }
    }

    /// Add one unit of a catalog product to the cart.
    ///
    /// Increments the existing line or appends a new one with quantity 1,
    /// then persists.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownProduct`] if the id is not in the catalog; the
    /// cart is left untouched.
    pub fn add_item(&mut self, product_id: ProductId) -> Result<(), UnknownProduct> {
        if !self.catalog.contains(&product_id) {
            return Err(UnknownProduct(product_id));
        }
        self.cart.increment(product_id);
        self.persist();
        Ok(())
    }

    /// Set the quantity of an existing line; zero removes it. A missing
    /// line is a no-op. Persists after the mutation.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: u32) {
        self.cart.set_quantity(product_id, quantity);
        self.persist();
    }

    /// Remove a line if present; silent when absent. Persists.
    pub fn remove_item(&mut self, product_id: &ProductId) {
        self.cart.remove(product_id);
        self.persist();
    }

    /// Empty the cart and persist the empty state.
    pub fn clear(&mut self) {
        self.cart.clear();
        self.persist();
    }

    /// Cart total at current catalog prices, in minor units.
    #[must_use]
    pub fn total(&self) -> Price {
        self.cart.total(&self.catalog)
    }

    /// Project the cart into remote-checkout line items. Pure.
    #[must_use]
    pub fn line_items(&self) -> Vec<LineItem> {
        self.cart.line_items(&self.catalog)
    }

    /// The current cart.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The catalog this store validates against.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Write the current cart to storage.
    ///
    /// A persist failure keeps the in-memory state and logs; the next
    /// successful mutation rewrites the whole value anyway.
    fn persist(&self) {
        let encoded = match serde_json::to_string(&self.cart) {
            Ok(encoded) => encoded,
            Err(e) => {
                tracing::warn!(error = %e, "cart state failed to encode");
                return;
            }
        };
        if let Err(e) = self.storage.set(KEY_CART_STATE, &encoded) {
            tracing::warn!(error = %e, "cart state failed to persist");
        }
    }
}
