use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// A currency pair such as EUR/USD.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyPair {
    pub base: String,
    pub quote: String,
}

impl CurrencyPair {
    pub fn new(base: &str, quote: &str) -> Self {
        Self {
            base: base.to_uppercase(),
            quote: quote.to_uppercase(),
        }
    }

    pub fn is_jpy(&self) -> bool {
        self.base == "JPY" || self.quote == "JPY"
    }

    /// Smallest standard quoted increment: 0.01 for yen pairs, else 0.0001.
    pub fn pip_size(&self) -> f64 {
        if self.is_jpy() {
            0.01
        } else {
            0.0001
        }
    }

    /// Decimal places used when quoting prices for this pair.
    pub fn price_decimals(&self) -> usize {
        if self.is_jpy() {
            3
        } else {
            5
        }
    }

    /// Convert a price distance into pips.
    pub fn to_pips(&self, distance: f64) -> f64 {
        distance.abs() / self.pip_size()
    }

    /// Round a price to this pair's quoting precision.
    pub fn round_price(&self, price: f64) -> f64 {
        let factor = 10f64.powi(self.price_decimals() as i32);
        (price * factor).round() / factor
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

impl FromStr for CurrencyPair {
    type Err = Error;

    /// Accepts "EUR/USD", "eur/usd" or "EURUSD".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (base, quote) = match trimmed.split_once('/') {
            Some((b, q)) => (b.trim(), q.trim()),
            None if trimmed.len() == 6 && trimmed.is_ascii() => trimmed.split_at(3),
            None => return Err(Error::InvalidPair(s.to_string())),
        };

        let is_code = |c: &str| c.len() == 3 && c.chars().all(|ch| ch.is_ascii_alphabetic());
        if !is_code(base) || !is_code(quote) {
            return Err(Error::InvalidPair(s.to_string()));
        }

        Ok(Self::new(base, quote))
    }
}

impl TryFrom<String> for CurrencyPair {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CurrencyPair> for String {
    fn from(pair: CurrencyPair) -> Self {
        pair.to_string()
    }
}
