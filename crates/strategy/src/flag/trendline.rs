use serde::{Deserialize, Serialize};
use tracing::trace;

use common::{Candle, Direction};

use crate::config::DetectorConfig;
use crate::flag::Consolidation;

/// Line through two non-adjacent extremes of a consolidation, in
/// consolidation-relative index space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendlineFit {
    pub slope: f64,
    pub intercept: f64,
    /// Relative indices of the candles touching the line.
    pub touches: Vec<usize>,
    pub touch_count: usize,
    pub valid: bool,
}

impl TrendlineFit {
    pub fn value_at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fit the resistance (bullish) or support (bearish) line of a flag and
/// count its touches.
///
/// The line is seeded from the most extreme candle and the next most
/// extreme candle that is not its neighbour, so both anchors never come
/// from the same micro-swing. This is a heuristic, not a regression.
pub fn fit_trendline(
    consolidation: &Consolidation,
    direction: Direction,
    cfg: &DetectorConfig,
) -> Option<TrendlineFit> {
    let candles = &consolidation.candles;
    let (slope, intercept) = seed_line(candles, direction)?;

    let touches = touch_indices(candles, direction, slope, intercept, cfg.touch_tolerance);
    let touch_count = touches.len();
    trace!(slope, intercept, touch_count, "Trendline fitted");

    Some(TrendlineFit {
        slope,
        intercept,
        touches,
        touch_count,
        valid: touch_count >= cfg.min_touches,
    })
}

/// Number of touches of the seeded line at an arbitrary tolerance.
/// Returns 0 when no line can be seeded.
pub fn count_touches(candles: &[Candle], direction: Direction, tolerance: f64) -> usize {
    match seed_line(candles, direction) {
        Some((slope, intercept)) => {
            touch_indices(candles, direction, slope, intercept, tolerance).len()
        }
        None => 0,
    }
}

fn extreme(c: &Candle, direction: Direction) -> f64 {
    match direction {
        Direction::Bullish => c.high,
        Direction::Bearish => c.low,
    }
}

fn seed_line(candles: &[Candle], direction: Direction) -> Option<(f64, f64)> {
    if candles.len() < 3 {
        return None;
    }

    let values: Vec<f64> = candles.iter().map(|c| extreme(c, direction)).collect();

    // Most extreme first; ties keep chronological order.
    let mut ranked = values.clone();
    match direction {
        Direction::Bullish => ranked.sort_by(|a, b| b.total_cmp(a)),
        Direction::Bearish => ranked.sort_by(|a, b| a.total_cmp(b)),
    }

    // Equal values resolve to the earliest candle holding them.
    let first_index_of = |v: f64| values.iter().position(|&x| x == v);

    let p1 = first_index_of(ranked[0])?;
    let p2 = ranked
        .iter()
        .filter_map(|&v| first_index_of(v))
        .find(|&idx| idx.abs_diff(p1) > 1)?;

    let (x1, y1) = (p1 as f64, values[p1]);
    let (x2, y2) = (p2 as f64, values[p2]);
    let slope = (y2 - y1) / (x2 - x1);
    let intercept = y1 - slope * x1;

    Some((slope, intercept))
}

fn touch_indices(
    candles: &[Candle],
    direction: Direction,
    slope: f64,
    intercept: f64,
    tolerance: f64,
) -> Vec<usize> {
    candles
        .iter()
        .enumerate()
        .filter(|(i, c)| {
            let line = slope * *i as f64 + intercept;
            (extreme(c, direction) - line).abs() <= (line * tolerance).abs()
        })
        .map(|(i, _)| i)
        .collect()
}
