//! Durable key-value storage.
//!
//! A `localStorage`-style get/set contract with opaque string values,
//! behind a trait so the stores can take an in-memory fake in tests and a
//! file-backed implementation in the running binary.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;

/// Storage key for the serialized cart.
pub const KEY_CART_STATE: &str = "cart-state";
/// Storage key for the selected payment mode.
pub const KEY_PAYMENT_MODE: &str = "payment-mode";
/// Storage key for the serialized transaction log.
pub const KEY_TRANSACTION_LOG: &str = "transaction-log";

/// Errors from the storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage file is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("storage lock poisoned")]
    Poisoned,
}

/// String-valued key-value persistence collaborator.
///
/// `get` returns absent-or-string; `set` overwrites. Values are opaque
/// strings; serialization of the stored state is the caller's business.
pub trait KeyValueStore: Send + Sync {
    /// Read the value for `key`, if present.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, overwriting any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

// =============================================================================
// FileStore
// =============================================================================

/// Key-value store backed by a single JSON object file on disk.
///
/// The whole map is rewritten on every `set`. Fine for a handful of small
/// keys; this is the durable analog of one browser's `localStorage`, not a
/// database.
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open a file store, loading existing entries if the file exists.
    ///
    /// A missing file starts empty. An unreadable or corrupt file also
    /// starts empty with a warning - losing a tutorial cart beats refusing
    /// to boot.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = Self::load_entries(&path).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "state file unreadable, starting empty");
            BTreeMap::new()
        });
        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    fn load_entries(path: &Path) -> Result<BTreeMap<String, String>, StorageError> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let raw = std::fs::read_to_string(path)?;
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let encoded = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, encoded)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.insert(key.to_owned(), value.to_owned());
        self.persist(&entries)
    }
}

// =============================================================================
// MemoryStore
// =============================================================================

/// In-memory key-value store for tests.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with entries.
    #[must_use]
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: Mutex::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "corner-shop-{name}-{}.json",
            uuid::Uuid::new_v4().simple()
        ))
    }

    #[test]
    fn test_memory_store_get_set() {
        let store = MemoryStore::new();
        assert!(store.get("cart-state").unwrap().is_none());

        store.set("cart-state", "{\"lines\":[]}").unwrap();
        assert_eq!(
            store.get("cart-state").unwrap().as_deref(),
            Some("{\"lines\":[]}")
        );

        store.set("cart-state", "updated").unwrap();
        assert_eq!(store.get("cart-state").unwrap().as_deref(), Some("updated"));
    }

    #[test]
    fn test_file_store_roundtrip_across_reopen() {
        let path = temp_path("roundtrip");

        let store = FileStore::open(&path);
        store.set(KEY_PAYMENT_MODE, "test").unwrap();
        store.set(KEY_CART_STATE, "{\"lines\":[]}").unwrap();
        drop(store);

        let reopened = FileStore::open(&path);
        assert_eq!(
            reopened.get(KEY_PAYMENT_MODE).unwrap().as_deref(),
            Some("test")
        );
        assert_eq!(
            reopened.get(KEY_CART_STATE).unwrap().as_deref(),
            Some("{\"lines\":[]}")
        );

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_file_store_missing_file_starts_empty() {
        let path = temp_path("missing");
        let store = FileStore::open(&path);
        assert!(store.get(KEY_CART_STATE).unwrap().is_none());
    }

    #[test]
    fn test_file_store_corrupt_file_starts_empty() {
        let path = temp_path("corrupt");
        std::fs::write(&path, "not json at all {{{").unwrap();

        let store = FileStore::open(&path);
        assert!(store.get(KEY_CART_STATE).unwrap().is_none());

        // And writes still work afterwards.
        store.set(KEY_CART_STATE, "ok").unwrap();
        assert_eq!(store.get(KEY_CART_STATE).unwrap().as_deref(), Some("ok"));

        std::fs::remove_file(&path).ok();
    }
}
