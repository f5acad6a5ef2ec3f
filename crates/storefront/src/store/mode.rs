//! The mode store: which gateway configuration (test/live) is active.

use std::sync::Arc;

use corner_shop_core::{ModeParseError, PaymentMode};

use crate::storage::{KEY_PAYMENT_MODE, KeyValueStore};

/// Storage-backed payment mode selection.
///
/// No mode is active until the user picks one. Once selected the mode is
/// persisted and stays active across restarts until explicitly changed.
pub struct ModeStore {
    mode: Option<PaymentMode>,
    storage: Arc<dyn KeyValueStore>,
}

impl ModeStore {
    /// Restore the selection from durable storage.
    ///
    /// An unreadable or unrecognized stored value behaves like no
    /// selection at all, with a warning.
    #[must_use]
    pub fn restore(storage: Arc<dyn KeyValueStore>) -> Self {
        let mode = match storage.get(KEY_PAYMENT_MODE) {
            Ok(Some(raw)) => match raw.parse::<PaymentMode>() {
                Ok(mode) => Some(mode),
                Err(e) => {
                    tracing::warn!(error = %e, "stored payment mode unrecognized, ignoring");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(error = %e, "payment mode unreadable, ignoring");
                None
            }
        };

        Self { mode, storage }
    }

    /// The active mode, if one has been selected.
    #[must_use]
    pub const fn current(&self) -> Option<PaymentMode> {
        self.mode
    }

    /// Select a mode from raw user input.
    ///
    /// Only the enumerated values `"test"` and `"live"` are accepted; on
    /// success the selection is persisted and becomes the active mode.
    ///
    /// # Errors
    ///
    /// Returns [`ModeParseError`] for any other input, leaving the
    /// previously active mode (or none) unchanged.
    pub fn select(&mut self, raw: &str) -> Result<PaymentMode, ModeParseError> {
        let mode = raw.parse::<PaymentMode>()?;
        self.mode = Some(mode);
        if let Err(e) = self.storage.set(KEY_PAYMENT_MODE, mode.as_str()) {
            tracing::warn!(error = %e, "payment mode failed to persist");
        }
        tracing::info!(%mode, "payment mode selected");
        Ok(mode)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_starts_unselected() {
        let store = ModeStore::restore(Arc::new(MemoryStore::new()));
        assert_eq!(store.current(), None);
    }

    #[test]
    fn test_select_persists() {
        let storage = Arc::new(MemoryStore::new());
        let mut store = ModeStore::restore(storage.clone());

        let mode = store.select("test").unwrap();
        assert_eq!(mode, PaymentMode::Test);
        assert_eq!(store.current(), Some(PaymentMode::Test));
        assert_eq!(
            storage.get(KEY_PAYMENT_MODE).unwrap().as_deref(),
            Some("test")
        );
    }

    #[test]
    fn test_select_bogus_leaves_mode_unchanged() {
        let mut store = ModeStore::restore(Arc::new(MemoryStore::new()));
        store.select("live").unwrap();

        assert!(store.select("bogus").is_err());
        assert_eq!(store.current(), Some(PaymentMode::Live));
    }

    #[test]
    fn test_select_bogus_from_unselected_stays_unselected() {
        let mut store = ModeStore::restore(Arc::new(MemoryStore::new()));
        assert!(store.select("production").is_err());
        assert_eq!(store.current(), None);
    }

    #[test]
    fn test_restore_previous_selection() {
        let storage: Arc<dyn KeyValueStore> =
            Arc::new(MemoryStore::with_entries([(KEY_PAYMENT_MODE, "live")]));
        let store = ModeStore::restore(storage);
        assert_eq!(store.current(), Some(PaymentMode::Live));
    }

    #[test]
    fn test_restore_unrecognized_value_ignored() {
        let storage: Arc<dyn KeyValueStore> =
            Arc::new(MemoryStore::with_entries([(KEY_PAYMENT_MODE, "sandbox")]));
        let store = ModeStore::restore(storage);
        assert_eq!(store.current(), None);
    }
}
