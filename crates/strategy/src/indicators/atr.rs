use common::Candle;

/// Average True Range with Wilder smoothing.
#[derive(Debug, Clone)]
pub struct Atr {
    pub period: usize,
}

impl Default for Atr {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Atr {
    /// Needs `period + 1` candles: true range uses the previous close.
    pub fn latest(&self, candles: &[Candle]) -> Option<f64> {
        if self.period == 0 || candles.len() < self.period + 1 {
            return None;
        }

        let ranges: Vec<f64> = candles
            .windows(2)
            .map(|w| {
                let (prev, cur) = (w[0], w[1]);
                (cur.high - cur.low)
                    .max((cur.high - prev.close).abs())
                    .max((cur.low - prev.close).abs())
            })
            .collect();

        let n = self.period as f64;
        let (seed, rest) = ranges.split_at(self.period);
        let mut atr = seed.iter().sum::<f64>() / n;
        for tr in rest {
            atr = (atr * (n - 1.0) + tr) / n;
        }
        Some(atr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn bars(ohlc: &[(f64, f64, f64, f64)]) -> Vec<Candle> {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        ohlc.iter()
            .enumerate()
            .map(|(i, &(o, h, l, c))| Candle::new(t0 + Duration::hours(i as i64), o, h, l, c))
            .collect()
    }

    #[test]
    fn constant_range() {
        let candles = bars(&[(1.0, 1.1, 0.9, 1.0); 6]);
        let atr = Atr { period: 3 }.latest(&candles).unwrap();
        assert!((atr - 0.2).abs() < 1e-12);
    }

    #[test]
    fn gap_counts_towards_range() {
        // Second bar gaps up 0.5 above the previous close.
        let candles = bars(&[(1.0, 1.0, 1.0, 1.0), (1.5, 1.6, 1.5, 1.6)]);
        let atr = Atr { period: 1 }.latest(&candles).unwrap();
        assert!((atr - 0.6).abs() < 1e-12);
    }

    #[test]
    fn too_short() {
        let candles = bars(&[(1.0, 1.1, 0.9, 1.0); 14]);
        assert!(Atr::default().latest(&candles).is_none());
    }
}
