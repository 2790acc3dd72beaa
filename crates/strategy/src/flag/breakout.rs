use serde::{Deserialize, Serialize};

use common::{Candle, Direction};

use crate::flag::{Consolidation, TrendlineFit};

/// First candle after the flag that closes through both the trendline and
/// the consolidation extreme.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Breakout {
    pub index: usize,
    /// Close of the breakout candle.
    pub price: f64,
    /// Consolidation extreme that was broken.
    pub level: f64,
}

/// First retest of the broken level that holds on the breakout side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pullback {
    pub index: usize,
    pub level: f64,
}

pub fn find_breakout(
    candles: &[Candle],
    consolidation: &Consolidation,
    trendline: &TrendlineFit,
    direction: Direction,
) -> Option<Breakout> {
    if consolidation.end_index + 1 >= candles.len() {
        return None;
    }

    let level = consolidation.breakout_extreme(direction);
    let sign = direction.sign();

    candles
        .iter()
        .enumerate()
        .skip(consolidation.end_index + 1)
        .find(|(i, c)| {
            let line = trendline.value_at((i - consolidation.start_index) as f64);
            (c.close - line) * sign > 0.0 && (c.close - level) * sign > 0.0
        })
        .map(|(index, c)| Breakout {
            index,
            price: c.close,
            level,
        })
}

pub fn find_pullback(candles: &[Candle], breakout: &Breakout, direction: Direction) -> Option<Pullback> {
    let level = breakout.level;

    candles
        .iter()
        .enumerate()
        .skip(breakout.index + 1)
        .find(|(_, c)| match direction {
            Direction::Bullish => c.low <= level && c.close > level,
            Direction::Bearish => c.high >= level && c.close < level,
        })
        .map(|(index, _)| Pullback { index, level })
}
