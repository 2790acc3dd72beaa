use serde::{Deserialize, Serialize};

use super::moving_average::ema_series;

/// MACD (Moving Average Convergence/Divergence).
///
/// MACD line = EMA(fast) − EMA(slow), signal = EMA(MACD line, signal period).
#[derive(Debug, Clone)]
pub struct Macd {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

/// Latest MACD reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdValue {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// Which side of the signal line the MACD line sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MacdBias {
    Bullish,
    Bearish,
    Neutral,
}

impl MacdValue {
    pub fn bias(&self) -> MacdBias {
        if self.macd > self.signal {
            MacdBias::Bullish
        } else if self.macd < self.signal {
            MacdBias::Bearish
        } else {
            MacdBias::Neutral
        }
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self {
            fast: 12,
            slow: 26,
            signal: 9,
        }
    }
}

impl Macd {
    /// Latest MACD of `closes` (oldest first).
    /// Needs at least `slow + signal - 1` closes.
    pub fn latest(&self, closes: &[f64]) -> Option<MacdValue> {
        if self.fast == 0 || self.fast >= self.slow || self.signal == 0 {
            return None;
        }

        let fast = ema_series(closes, self.fast);
        let slow = ema_series(closes, self.slow);
        if slow.is_empty() {
            return None;
        }

        // Align both series on the last `slow.len()` closes.
        let offset = fast.len() - slow.len();
        let line: Vec<f64> = slow
            .iter()
            .enumerate()
            .map(|(i, s)| fast[i + offset] - s)
            .collect();

        let signal = ema_series(&line, self.signal);
        let (&macd, &sig) = (line.last()?, signal.last()?);

        Some(MacdValue {
            macd,
            signal: sig,
            histogram: macd - sig,
        })
    }
}
