use serde::{Deserialize, Serialize};

use common::Candle;

use super::moving_average::sma;

/// Stochastic oscillator: %K over `period` bars, %D = SMA(%K, `signal`).
#[derive(Debug, Clone)]
pub struct Stochastic {
    pub period: usize,
    pub signal: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StochasticValue {
    pub k: f64,
    pub d: f64,
}

impl Default for Stochastic {
    fn default() -> Self {
        Self { period: 14, signal: 3 }
    }
}

impl Stochastic {
    pub fn latest(&self, candles: &[Candle]) -> Option<StochasticValue> {
        if self.period == 0 || self.signal == 0 || candles.len() < self.period + self.signal - 1 {
            return None;
        }

        let ks: Vec<f64> = candles
            .windows(self.period)
            .map(|w| {
                let high = w.iter().map(|c| c.high).fold(f64::MIN, f64::max);
                let low = w.iter().map(|c| c.low).fold(f64::MAX, f64::min);
                let close = w[w.len() - 1].close;
                if high == low {
                    50.0
                } else {
                    (close - low) / (high - low) * 100.0
                }
            })
            .collect();

        let k = *ks.last()?;
        let d = sma(&ks, self.signal)?;
        Some(StochasticValue { k, d })
    }
}
