use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// One normalized OHLC candle. Series are ordered oldest first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Candle {
    pub fn new(timestamp: DateTime<Utc>, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
        }
    }
}

/// Check the candle-source contract: enough history, sane OHLC values and
/// strictly ascending timestamps.
///
/// Pattern absence is never an error; this is the only place the core
/// rejects its input.
pub fn validate_candles(candles: &[Candle], min_len: usize) -> Result<()> {
    if candles.len() < min_len {
        return Err(Error::InsufficientData {
            need: min_len,
            got: candles.len(),
        });
    }

    for (index, c) in candles.iter().enumerate() {
        let prices = [c.open, c.high, c.low, c.close];
        if prices.iter().any(|p| !p.is_finite()) {
            return Err(Error::InvalidCandle {
                index,
                reason: "non-finite price",
            });
        }
        if c.high < c.low {
            return Err(Error::InvalidCandle {
                index,
                reason: "high below low",
            });
        }
        if c.open > c.high || c.open < c.low || c.close > c.high || c.close < c.low {
            return Err(Error::InvalidCandle {
                index,
                reason: "open/close outside high-low range",
            });
        }
        if index > 0 && c.timestamp <= candles[index - 1].timestamp {
            return Err(Error::InvalidCandle {
                index,
                reason: "timestamp not after previous candle",
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn series(n: usize) -> Vec<Candle> {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        (0..n)
            .map(|i| {
                let p = 1.1 + i as f64 * 0.0001;
                Candle::new(start + Duration::hours(i as i64), p, p + 0.0005, p - 0.0005, p)
            })
            .collect()
    }

    #[test]
    fn rejects_short_series() {
        let err = validate_candles(&series(10), 30).unwrap_err();
        assert!(matches!(err, Error::InsufficientData { need: 30, got: 10 }));
    }

    #[test]
    fn rejects_empty_series() {
        let err = validate_candles(&[], 1).unwrap_err();
        assert!(matches!(err, Error::InsufficientData { need: 1, got: 0 }));
    }

    #[test]
    fn rejects_inverted_candle() {
        let mut candles = series(30);
        candles[7].high = candles[7].low - 0.001;
        let err = validate_candles(&candles, 30).unwrap_err();
        assert!(matches!(err, Error::InvalidCandle { index: 7, .. }));
    }

    #[test]
    fn rejects_close_outside_range() {
        let mut candles = series(30);
        candles[3].close = candles[3].high + 0.01;
        assert!(validate_candles(&candles, 30).is_err());
    }

    #[test]
    fn rejects_unordered_timestamps() {
        let mut candles = series(30);
        candles[12].timestamp = candles[11].timestamp;
        let err = validate_candles(&candles, 30).unwrap_err();
        assert!(matches!(err, Error::InvalidCandle { index: 12, .. }));
    }

    #[test]
    fn accepts_well_formed_series() {
        assert!(validate_candles(&series(30), 30).is_ok());
    }
}
