//! The transaction log: past checkout outcomes, newest first.

use std::sync::Arc;

use corner_shop_core::TransactionRecord;

use crate::storage::{KEY_TRANSACTION_LOG, KeyValueStore};

/// Storage-backed list of past transaction records.
pub struct TransactionLog {
    records: Vec<TransactionRecord>,
    storage: Arc<dyn KeyValueStore>,
}

impl TransactionLog {
    /// Restore the log from durable storage; undecodable state starts an
    /// empty log with a warning.
    #[must_use]
    pub fn restore(storage: Arc<dyn KeyValueStore>) -> Self {
        let records = match storage.get(KEY_TRANSACTION_LOG) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "transaction log undecodable, starting empty");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "transaction log unreadable, starting empty");
                Vec::new()
            }
        };

        Self { records, storage }
    }

    /// Prepend a record (the list reads newest first) and persist.
    pub fn append(&mut self, record: TransactionRecord) {
        self.records.insert(0, record);
        self.persist();
    }

    /// Records, newest first.
    #[must_use]
    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    fn persist(&self) {
        let encoded = match serde_json::to_string(&self.records) {
            Ok(encoded) => encoded,
            Err(e) => {
                tracing::warn!(error = %e, "transaction log failed to encode");
                return;
            }
        };
        if let Err(e) = self.storage.set(KEY_TRANSACTION_LOG, &encoded) {
            tracing::warn!(error = %e, "transaction log failed to persist");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use corner_shop_core::{Price, TransactionStatus};

    use crate::storage::MemoryStore;

    #[test]
    fn test_append_newest_first_and_roundtrip() {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());

        {
            let mut log = TransactionLog::restore(storage.clone());
            log.append(TransactionRecord::from_session(
                Some("cs_first"),
                Price::from_minor_units(499),
                TransactionStatus::Succeeded,
            ));
            log.append(TransactionRecord::from_session(
                Some("cs_second"),
                Price::from_minor_units(1999),
                TransactionStatus::Succeeded,
            ));
        }

        let restored = TransactionLog::restore(storage);
        assert_eq!(restored.records().len(), 2);
        assert_eq!(restored.records()[0].id, "cs_second");
        assert_eq!(restored.records()[1].id, "cs_first");
    }

    #[test]
    fn test_undecodable_log_starts_empty() {
        let storage: Arc<dyn KeyValueStore> =
            Arc::new(MemoryStore::with_entries([(KEY_TRANSACTION_LOG, "42")]));
        let log = TransactionLog::restore(storage);
        assert!(log.records().is_empty());
    }
}
