use crate::error::HppError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of minor units in one major unit (cents per euro, pence per pound).
const MINOR_UNITS_PER_MAJOR: i64 = 100;

/// A charge amount expressed in major currency units (e.g. `20.50` EUR).
///
/// Wraps `rust_decimal::Decimal` so that only non-negative values with at most
/// two fractional digits can be signed. The processor expects the amount in
/// minor units, see [`Amount::to_minor_units`].
///
/// Zero-decimal currencies (JPY and friends) are not scaled differently: callers
/// must pre-scale those amounts themselves.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, HppError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(HppError::Input("amount must not be negative".to_string()));
        }
        if value.normalize().scale() > 2 {
            return Err(HppError::Input(format!(
                "amount {value} has more than two decimal places"
            )));
        }
        if value.checked_mul(Decimal::from(MINOR_UNITS_PER_MAJOR)).is_none() {
            return Err(HppError::Input("amount is too large".to_string()));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Renders the amount in minor units as a plain integer string.
    ///
    /// `20` becomes `"2000"` and `20.50` becomes `"2050"`. No thousands
    /// separators and no decimal point.
    // `new` rejects amounts whose scaling would overflow.
    pub fn to_minor_units(&self) -> String {
        let minor = (self.0 * Decimal::from(MINOR_UNITS_PER_MAJOR)).trunc();
        minor.normalize().to_string()
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = HppError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl From<u32> for Amount {
    fn from(value: u32) -> Self {
        Self(Decimal::from(value))
    }
}

impl FromStr for Amount {
    type Err = HppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(HppError::Input("amount is required".to_string()));
        }
        let value = Decimal::from_str(trimmed)
            .map_err(|_| HppError::Input(format!("amount '{trimmed}' is not a number")))?;
        Self::new(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
