use serde::{Deserialize, Serialize};
use tracing::trace;

use common::{Candle, Direction};

use crate::config::DetectorConfig;
use crate::flag::Pole;

/// The range-bound retracement that follows a pole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consolidation {
    pub start_index: usize,
    /// Inclusive.
    pub end_index: usize,
    pub highest_high: f64,
    pub lowest_low: f64,
    pub range: f64,
    /// Retracement depth as a fraction of the pole extreme.
    pub retracement: f64,
    /// Copy of the window, indexed 0..len relative to `start_index`.
    pub candles: Vec<Candle>,
}

impl Consolidation {
    /// Extreme the flag is bounded by on the breakout side.
    pub fn breakout_extreme(&self, direction: Direction) -> f64 {
        match direction {
            Direction::Bullish => self.highest_high,
            Direction::Bearish => self.lowest_low,
        }
    }

    /// Extreme on the opposite side, used for the protective stop.
    pub fn protective_extreme(&self, direction: Direction) -> f64 {
        match direction {
            Direction::Bullish => self.lowest_low,
            Direction::Bearish => self.highest_high,
        }
    }
}

/// Locate the consolidation after `pole`.
///
/// The window grows from the candle after the pole until a close breaches
/// the pole's extreme (that candle is included) or the series ends.
pub fn find_consolidation(
    candles: &[Candle],
    pole: &Pole,
    direction: Direction,
    cfg: &DetectorConfig,
) -> Option<Consolidation> {
    let pole_end = pole.end_index;
    if pole_end + 3 >= candles.len() {
        trace!(pole_end, "Not enough candles after pole");
        return None;
    }

    let start = pole_end + 1;
    let pole_extreme = match direction {
        Direction::Bullish => candles[pole_end].high,
        Direction::Bearish => candles[pole_end].low,
    };

    let mut end = start;
    for (i, c) in candles.iter().enumerate().skip(start + 2) {
        end = i;
        let breached = match direction {
            Direction::Bullish => c.close > pole_extreme,
            Direction::Bearish => c.close < pole_extreme,
        };
        if breached {
            break;
        }
    }

    if end + 1 - start < cfg.min_consolidation_candles {
        trace!(start, end, "Consolidation too short");
        return None;
    }

    let window = &candles[start..=end];
    let highest_high = window.iter().map(|c| c.high).fold(f64::MIN, f64::max);
    let lowest_low = window.iter().map(|c| c.low).fold(f64::MAX, f64::min);

    let retracement = match direction {
        Direction::Bullish => (pole_extreme - lowest_low) / pole_extreme,
        Direction::Bearish => (highest_high - pole_extreme) / pole_extreme,
    };

    if retracement <= cfg.retracement_min || retracement >= cfg.retracement_max {
        trace!(retracement, "Retracement outside accepted band");
        return None;
    }

    Some(Consolidation {
        start_index: start,
        end_index: end,
        highest_high,
        lowest_low,
        range: highest_high - lowest_low,
        retracement,
        candles: window.to_vec(),
    })
}
