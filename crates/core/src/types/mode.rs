//! Payment gateway operating mode.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing a [`PaymentMode`] from user input.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid payment mode: {0:?} (expected \"test\" or \"live\")")]
pub struct ModeParseError(pub String);

/// Which gateway configuration is active.
///
/// Test and live are mutually exclusive; the selection is persisted
/// across sessions and stable until explicitly changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMode {
    /// Test keys; payments are simulated with test cards.
    Test,
    /// Live keys; real payments would be processed.
    Live,
}

impl PaymentMode {
    /// The wire/storage representation ("test" or "live").
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Test => "test",
            Self::Live => "live",
        }
    }
}

impl fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaymentMode {
    type Err = ModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "test" => Ok(Self::Test),
            "live" => Ok(Self::Live),
            other => Err(ModeParseError(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_only_enumerated_values() {
        assert_eq!("test".parse::<PaymentMode>().expect("test"), PaymentMode::Test);
        assert_eq!("live".parse::<PaymentMode>().expect("live"), PaymentMode::Live);
        assert!("bogus".parse::<PaymentMode>().is_err());
        assert!("Test".parse::<PaymentMode>().is_err());
        assert!(String::new().parse::<PaymentMode>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&PaymentMode::Live).expect("serialize"),
            "\"live\""
        );
        let parsed: PaymentMode = serde_json::from_str("\"test\"").expect("deserialize");
        assert_eq!(parsed, PaymentMode::Test);
    }
}
