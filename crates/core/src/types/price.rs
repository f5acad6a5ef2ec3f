//! Type-safe price representation in minor currency units.
//!
//! Amounts are stored as non-negative integers in the smallest currency
//! unit (cents for EUR/USD), which avoids floating-point rounding in cart
//! arithmetic. Display formatting goes through `rust_decimal`.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price in minor currency units (e.g. cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// The zero price.
    pub const ZERO: Self = Self(0);

    /// Create a price from an amount in minor units.
    #[must_use]
    pub const fn from_minor_units(minor_units: u64) -> Self {
        Self(minor_units)
    }

    /// The amount in minor units.
    #[must_use]
    pub const fn minor_units(&self) -> u64 {
        self.0
    }

    /// Multiply by a quantity, saturating on overflow.
    ///
    /// Cart totals stay far below `u64::MAX`, so saturation is a
    /// theoretical bound rather than an expected path.
    #[must_use]
    pub const fn saturating_mul(&self, quantity: u64) -> Self {
        Self(self.0.saturating_mul(quantity))
    }

    /// Add another price, saturating on overflow.
    #[must_use]
    pub const fn saturating_add(&self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Format for display in the given currency (e.g. "€4.99").
    #[must_use]
    pub fn display(&self, currency: Currency) -> String {
        // u64 -> i64 is safe for any realistic amount; clamp to be sure.
        let minor = i64::try_from(self.0).unwrap_or(i64::MAX);
        let amount = Decimal::new(minor, 2);
        format!("{}{amount:.2}", currency.symbol())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display(Currency::default()))
    }
}

/// ISO 4217 currency codes supported by the tutorial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    #[default]
    Eur,
    Usd,
    Gbp,
}

impl Currency {
    /// The display symbol for this currency.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Eur => "€",
            Self::Usd => "$",
            Self::Gbp => "£",
        }
    }

    /// The lowercase ISO code used on the wire (e.g. "eur").
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Eur => "eur",
            Self::Usd => "usd",
            Self::Gbp => "gbp",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_eur() {
        assert_eq!(Price::from_minor_units(499).display(Currency::Eur), "€4.99");
        assert_eq!(Price::from_minor_units(100).display(Currency::Eur), "€1.00");
        assert_eq!(Price::ZERO.display(Currency::Eur), "€0.00");
    }

    #[test]
    fn test_display_sub_unit_amounts() {
        assert_eq!(Price::from_minor_units(5).display(Currency::Eur), "€0.05");
        assert_eq!(Price::from_minor_units(50).display(Currency::Usd), "$0.50");
    }

    #[test]
    fn test_mul_and_add() {
        let total = Price::from_minor_units(499)
            .saturating_mul(2)
            .saturating_add(Price::from_minor_units(1999));
        assert_eq!(total.minor_units(), 2997);
    }

    #[test]
    fn test_mul_saturates() {
        let huge = Price::from_minor_units(u64::MAX);
        assert_eq!(huge.saturating_mul(2), huge);
    }

    #[test]
    fn test_serde_transparent() {
        let price = Price::from_minor_units(2499);
        let json = serde_json::to_string(&price).expect("serialize");
        assert_eq!(json, "2499");
    }

    #[test]
    fn test_currency_codes() {
        assert_eq!(Currency::Eur.code(), "eur");
        assert_eq!(Currency::Eur.symbol(), "€");
    }
}
