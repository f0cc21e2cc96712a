//! Currency codes for plan amounts.
//!
//! Amounts themselves are plain `rust_decimal::Decimal` values; the currency
//! is carried once per plan.

use serde::{Deserialize, Serialize};

/// ISO 4217 currency codes supported by the system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Colombian Peso
    #[default]
    Cop,
    /// US Dollar
    Usd,
    /// Euro
    Eur,
    /// Mexican Peso
    Mxn,
    /// Indonesian Rupiah
    Idr,
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cop => write!(f, "COP"),
            Self::Usd => write!(f, "USD"),
            Self::Eur => write!(f, "EUR"),
            Self::Mxn => write!(f, "MXN"),
            Self::Idr => write!(f, "IDR"),
        }
    }
}
