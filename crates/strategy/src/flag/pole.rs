use serde::{Deserialize, Serialize};
use tracing::trace;

use common::{Candle, Direction};

use crate::config::DetectorConfig;

/// A strong directional run preceding the flag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pole {
    pub start_index: usize,
    pub end_index: usize,
    /// Low of the first candle (bullish) or high of the first candle (bearish).
    pub start_price: f64,
    /// High of the last candle (bullish) or low of the last candle (bearish).
    pub end_price: f64,
    /// Favourable move, always positive for an accepted pole.
    pub size: f64,
}

/// Find all non-overlapping poles in `candles`, oldest first.
///
/// Each scan position is widened backward to the local extreme the run
/// started from and forward while every next candle extends the run.
pub fn find_poles(candles: &[Candle], direction: Direction, cfg: &DetectorConfig) -> Vec<Pole> {
    let mut poles = Vec::new();
    let margin = cfg.pole_scan_margin;
    if candles.len() <= margin * 2 {
        return poles;
    }

    let mut i = margin;
    while i < candles.len() - margin {
        let (start, end) = widen_run(candles, i, direction);

        if end - start + 1 >= cfg.min_pole_candles {
            let (start_price, end_price) = match direction {
                Direction::Bullish => (candles[start].low, candles[end].high),
                Direction::Bearish => (candles[start].high, candles[end].low),
            };
            let size = (end_price - start_price) * direction.sign();

            if size / start_price > cfg.min_pole_move {
                trace!(start, end, size, %direction, "Pole accepted");
                poles.push(Pole {
                    start_index: start,
                    end_index: end,
                    start_price,
                    end_price,
                    size,
                });
                i = end + 1;
                continue;
            }
        }

        i += 1;
    }

    poles
}

/// The most recent pole, if any.
pub fn latest_pole(candles: &[Candle], direction: Direction, cfg: &DetectorConfig) -> Option<Pole> {
    find_poles(candles, direction, cfg).pop()
}

fn widen_run(candles: &[Candle], at: usize, direction: Direction) -> (usize, usize) {
    let mut start = at;
    let mut end = at;

    match direction {
        Direction::Bullish => {
            while start > 0 && candles[start - 1].low > candles[start].low {
                start -= 1;
            }
            while end + 1 < candles.len() && candles[end + 1].high > candles[end].high {
                end += 1;
            }
        }
        Direction::Bearish => {
            while start > 0 && candles[start - 1].high < candles[start].high {
                start -= 1;
            }
            while end + 1 < candles.len() && candles[end + 1].low < candles[end].low {
                end += 1;
            }
        }
    }

    (start, end)
}
