use serde::{Deserialize, Serialize};

/// Overbought/oversold reading of an RSI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RsiZone {
    Oversold,
    Neutral,
    Overbought,
}

/// RSI (Relative Strength Index) with Wilder smoothing.
#[derive(Debug, Clone)]
pub struct Rsi {
    pub period: usize,
    pub overbought: f64,
    pub oversold: f64,
}

impl Default for Rsi {
    fn default() -> Self {
        Self {
            period: 14,
            overbought: 70.0,
            oversold: 30.0,
        }
    }
}

impl Rsi {
    /// Latest RSI of `closes` (oldest first).
    /// Returns `None` until at least `period + 1` closes are available.
    pub fn latest(&self, closes: &[f64]) -> Option<f64> {
        if self.period < 2 || closes.len() < self.period + 1 {
            return None;
        }

        let changes: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();
        let (seed, rest) = changes.split_at(self.period);
        let n = self.period as f64;

        let mut avg_gain = seed.iter().map(|c| c.max(0.0)).sum::<f64>() / n;
        let mut avg_loss = seed.iter().map(|c| (-c).max(0.0)).sum::<f64>() / n;

        for &change in rest {
            avg_gain = (avg_gain * (n - 1.0) + change.max(0.0)) / n;
            avg_loss = (avg_loss * (n - 1.0) + (-change).max(0.0)) / n;
        }

        if avg_loss == 0.0 {
            return Some(100.0);
        }
        let rs = avg_gain / avg_loss;
        Some(100.0 - 100.0 / (1.0 + rs))
    }

    pub fn zone(&self, value: f64) -> RsiZone {
        if value < self.oversold {
            RsiZone::Oversold
        } else if value > self.overbought {
            RsiZone::Overbought
        } else {
            RsiZone::Neutral
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_when_insufficient_data() {
        // Need at least period+1 = 15 values
        assert!(Rsi::default().latest(&[1.1; 14]).is_none());
    }

    #[test]
    fn all_gains_is_100() {
        let rsi = Rsi { period: 3, ..Rsi::default() };
        let value = rsi.latest(&[1.10, 1.11, 1.12, 1.13, 1.14]).unwrap();
        assert!((value - 100.0).abs() < 1e-6, "Expected ~100, got {value}");
        assert_eq!(rsi.zone(value), RsiZone::Overbought);
    }

    #[test]
    fn all_losses_is_0() {
        let rsi = Rsi { period: 3, ..Rsi::default() };
        let value = rsi.latest(&[1.14, 1.13, 1.12, 1.11, 1.10]).unwrap();
        assert!(value.abs() < 1e-6, "Expected ~0, got {value}");
        assert_eq!(rsi.zone(value), RsiZone::Oversold);
    }

    #[test]
    fn mixed_series_stays_in_range() {
        let prices = vec![
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.15, 43.61, 44.33, 44.83, 45.10,
            45.15, 44.34, 44.09,
        ];
        let v = Rsi::default().latest(&prices).unwrap();
        assert!((0.0..=100.0).contains(&v), "RSI out of range: {v}");
    }
}
