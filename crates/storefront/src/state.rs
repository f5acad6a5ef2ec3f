//! Application state shared across handlers.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use corner_shop_core::{Catalog, PaymentMode};
use tokio::sync::Mutex;

use crate::config::{KeyStatus, StorefrontConfig};
use crate::payment::CheckoutGateway;
use crate::storage::KeyValueStore;
use crate::store::{CartStore, ModeStore, TransactionLog};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The stores sit behind async mutexes:
/// every mutation is a short, synchronous CRUD step plus a small file
/// write, so serializing them is cheap and keeps the persist ordering
/// deterministic.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Arc<Catalog>,
    cart: Mutex<CartStore>,
    mode: Mutex<ModeStore>,
    transactions: Mutex<TransactionLog>,
    gateway: Arc<dyn CheckoutGateway>,
    checkout_in_flight: AtomicBool,
}

impl AppState {
    /// Build the application state, restoring stores from storage.
    #[must_use]
    pub fn new(
        config: StorefrontConfig,
        catalog: Arc<Catalog>,
        storage: Arc<dyn KeyValueStore>,
        gateway: Arc<dyn CheckoutGateway>,
    ) -> Self {
        let cart = CartStore::restore(catalog.clone(), storage.clone());
        let mode = ModeStore::restore(storage.clone());
        let transactions = TransactionLog::restore(storage);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                cart: Mutex::new(cart),
                mode: Mutex::new(mode),
                transactions: Mutex::new(transactions),
                gateway,
                checkout_in_flight: AtomicBool::new(false),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get the cart store.
    #[must_use]
    pub fn cart(&self) -> &Mutex<CartStore> {
        &self.inner.cart
    }

    /// Get the mode store.
    #[must_use]
    pub fn mode(&self) -> &Mutex<ModeStore> {
        &self.inner.mode
    }

    /// Get the transaction log.
    #[must_use]
    pub fn transactions(&self) -> &Mutex<TransactionLog> {
        &self.inner.transactions
    }

    /// Get the checkout gateway.
    #[must_use]
    pub fn gateway(&self) -> &Arc<dyn CheckoutGateway> {
        &self.inner.gateway
    }

    /// Resolve the publishable key for a mode from static configuration.
    #[must_use]
    pub fn key_status(&self, mode: PaymentMode) -> KeyStatus {
        self.inner.config.gateway.key_for(mode)
    }

    /// Try to claim the single checkout slot.
    ///
    /// At most one checkout attempt is in flight at a time; a `None`
    /// here means another attempt is already running. The returned guard
    /// releases the slot on drop, covering every early-return path.
    #[must_use]
    pub fn try_begin_checkout(&self) -> Option<CheckoutSlot> {
        self.inner
            .checkout_in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| CheckoutSlot {
                inner: self.inner.clone(),
            })
    }
}

/// RAII guard for the single in-flight checkout attempt.
pub struct CheckoutSlot {
    inner: Arc<AppStateInner>,
}

impl Drop for CheckoutSlot {
    fn drop(&mut self) {
        self.inner.checkout_in_flight.store(false, Ordering::SeqCst);
    }
}
