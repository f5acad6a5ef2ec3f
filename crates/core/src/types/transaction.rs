//! Past-transaction records fed by the checkout return flow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::price::Price;

/// Display length for checkout session ids in the transaction list.
const SESSION_ID_DISPLAY_LEN: usize = 10;

/// Outcome of a checkout attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    /// The hosted checkout reported success on return.
    Succeeded,
    /// The buyer backed out of the hosted checkout.
    Canceled,
}

impl TransactionStatus {
    /// Human-readable label for the transaction list.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Succeeded => "Completed",
            Self::Canceled => "Canceled",
        }
    }
}

/// A record of a completed (or canceled) checkout attempt.
///
/// The amount is the cart total observed by the return flow; without a
/// backend there is no authoritative charged amount, so the record is
/// informational rather than accounting-grade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Session id (truncated for display) or a generated id.
    pub id: String,
    /// When the return flow observed the outcome.
    pub date: DateTime<Utc>,
    /// Amount in minor units.
    pub amount: Price,
    /// Outcome.
    pub status: TransactionStatus,
}

impl TransactionRecord {
    /// Build a record from an optional checkout session id.
    ///
    /// Session ids are truncated to ten characters for display, matching
    /// the transaction panel; absent ids get a generated one.
    #[must_use]
    pub fn from_session(
        session_id: Option<&str>,
        amount: Price,
        status: TransactionStatus,
    ) -> Self {
        let id = session_id.map_or_else(
            || Uuid::new_v4().simple().to_string(),
            |sid| sid.chars().take(SESSION_ID_DISPLAY_LEN).collect(),
        );
        Self {
            id,
            date: Utc::now(),
            amount,
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_truncated() {
        let record = TransactionRecord::from_session(
            Some("cs_test_a1b2c3d4e5f6g7h8"),
            Price::from_minor_units(2997),
            TransactionStatus::Succeeded,
        );
        assert_eq!(record.id, "cs_test_a1");
        assert_eq!(record.amount.minor_units(), 2997);
    }

    #[test]
    fn test_missing_session_id_generates_one() {
        let record =
            TransactionRecord::from_session(None, Price::ZERO, TransactionStatus::Canceled);
        assert!(!record.id.is_empty());
        assert_eq!(record.status, TransactionStatus::Canceled);
    }

    #[test]
    fn test_serde_roundtrip() {
        let record = TransactionRecord::from_session(
            Some("cs_test_xyz"),
            Price::from_minor_units(499),
            TransactionStatus::Succeeded,
        );
        let json = serde_json::to_string(&record).expect("serialize");
        let restored: TransactionRecord = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored, record);
    }
}
