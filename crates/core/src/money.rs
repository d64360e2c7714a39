use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::field::ExtractError;

/// A naira amount held at kobo precision (two decimal places).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Amount(Decimal);

impl Amount {
    /// Parse the numeric substring produced by the amount extractor, e.g. `"6,000.00"`.
    /// Thousands separators are dropped before conversion.
    pub fn parse(raw: &str) -> Result<Self, ExtractError> {
        let clean = raw.trim().replace(',', "");
        if clean.is_empty() {
            return Err(ExtractError::MalformedAmount { raw: raw.to_string() });
        }
        let dec = Decimal::from_str(&clean)
            .map_err(|_| ExtractError::MalformedAmount { raw: raw.to_string() })?;
        if dec.is_sign_negative() {
            return Err(ExtractError::MalformedAmount { raw: raw.to_string() });
        }
        Ok(Amount::from_decimal(dec))
    }

    pub fn from_kobo(kobo: i64) -> Self {
        Amount(Decimal::new(kobo, 2))
    }

    /// `None` only if the amount does not fit in an `i64` count of kobo.
    pub fn to_kobo(self) -> Option<i64> {
        (self.0 * Decimal::from(100)).round().to_i64()
    }

    pub fn from_decimal(decimal: Decimal) -> Self {
        let mut d = decimal.round_dp(2);
        d.rescale(2);
        Amount(d)
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    pub fn zero() -> Self {
        Amount(Decimal::ZERO)
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl FromStr for Amount {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Amount::parse(s)
    }
}
