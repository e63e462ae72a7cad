//! Fixed-point decimal persistence
//!
//! Monetary (and percentage-valued) columns are stored as TEXT so the exact
//! decimal value survives the round trip through SQLite; all arithmetic stays
//! in [`rust_decimal::Decimal`]. In JSON the value is a decimal string
//! (`"315.00"`), never a float.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Exact decimal value persisted as TEXT
///
/// Decoded from rows via `#[sqlx(try_from = "String")]`; bound into queries
/// with [`Money::as_db`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(pub Decimal);

impl Money {
    /// TEXT representation bound into SQL parameters
    pub fn as_db(&self) -> String {
        self.0.to_string()
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }
}

impl TryFrom<String> for Money {
    type Error = rust_decimal::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Ok(Money(Decimal::from_str(&value)?))
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Money(value)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_preserves_scale() {
        let m = Money::try_from("150.00".to_string()).unwrap();
        assert_eq!(m.as_db(), "150.00");
        assert_eq!(m.0, "150.00".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(Money::try_from("12.3.4".to_string()).is_err());
        assert!(Money::try_from("abc".to_string()).is_err());
    }

    #[test]
    fn test_json_is_a_string() {
        let m = Money::try_from("5.00".to_string()).unwrap();
        assert_eq!(serde_json::to_string(&m).unwrap(), "\"5.00\"");
        let back: Money = serde_json::from_str("\"5.00\"").unwrap();
        assert_eq!(back, m);
    }
}
