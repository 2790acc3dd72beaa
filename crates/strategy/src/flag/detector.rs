use serde::{Deserialize, Serialize};
use tracing::debug;

use common::{Candle, CurrencyPair, Direction};

use crate::config::DetectorConfig;
use crate::flag::{
    find_breakout, find_consolidation, find_pullback, fit_trendline, latest_pole, Breakout,
    Consolidation, Pole, Pullback, TrendlineFit,
};

/// Flag pattern found on one timeframe in one direction.
///
/// `detected` means the flag broke out; `valid` additionally needs the
/// pullback that produces an entry. Pole, consolidation, breakout and
/// pullback indices point into the series passed to [`detect_flag`];
/// trendline touches are relative to the consolidation start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlagPattern {
    pub direction: Direction,
    pub detected: bool,
    pub pole: Option<Pole>,
    pub consolidation: Option<Consolidation>,
    pub trendline: Option<TrendlineFit>,
    pub breakout: Option<Breakout>,
    pub pullback: Option<Pullback>,
    pub entry: Option<f64>,
    pub stop_loss: Option<f64>,
    pub take_profit: Option<f64>,
    pub stop_loss_pips: Option<f64>,
    pub take_profit_pips: Option<f64>,
    pub valid: bool,
}

impl FlagPattern {
    pub fn not_detected(direction: Direction) -> Self {
        Self {
            direction,
            detected: false,
            pole: None,
            consolidation: None,
            trendline: None,
            breakout: None,
            pullback: None,
            entry: None,
            stop_loss: None,
            take_profit: None,
            stop_loss_pips: None,
            take_profit_pips: None,
            valid: false,
        }
    }

    pub fn touch_count(&self) -> usize {
        self.trendline.as_ref().map_or(0, |t| t.touch_count)
    }
}

/// Bullish and bearish results for one candle series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeframeAnalysis {
    pub bullish: FlagPattern,
    pub bearish: FlagPattern,
}

impl TimeframeAnalysis {
    pub fn get(&self, direction: Direction) -> &FlagPattern {
        match direction {
            Direction::Bullish => &self.bullish,
            Direction::Bearish => &self.bearish,
        }
    }
}

/// Run the pole → consolidation → trendline → breakout → pullback chain on
/// the last `cfg.lookback` candles.
///
/// Series shorter than the lookback are reported as not detected; rejecting
/// them is the caller's input check, not the detector's.
pub fn detect_flag(
    candles: &[Candle],
    direction: Direction,
    pair: &CurrencyPair,
    cfg: &DetectorConfig,
) -> FlagPattern {
    let mut pattern = FlagPattern::not_detected(direction);
    if candles.len() < cfg.lookback {
        debug!(len = candles.len(), lookback = cfg.lookback, "Series shorter than lookback");
        return pattern;
    }
    let offset = candles.len() - cfg.lookback;
    let data = &candles[offset..];

    let Some(pole) = latest_pole(data, direction, cfg) else {
        debug!(%direction, "No pole");
        return pattern;
    };
    let Some(consolidation) = find_consolidation(data, &pole, direction, cfg) else {
        debug!(%direction, pole_end = pole.end_index, "No consolidation after pole");
        return pattern;
    };
    let trendline = match fit_trendline(&consolidation, direction, cfg) {
        Some(t) if t.valid => t,
        other => {
            debug!(
                %direction,
                touches = other.as_ref().map_or(0, |t| t.touch_count),
                "Trendline not confirmed"
            );
            return pattern;
        }
    };
    let Some(breakout) = find_breakout(data, &consolidation, &trendline, direction) else {
        debug!(%direction, "Flag still forming, no breakout");
        return pattern;
    };

    let pullback = find_pullback(data, &breakout, direction);

    pattern.detected = true;
    if let Some(pb) = &pullback {
        let entry = pb.level;
        let stop_loss = consolidation.protective_extreme(direction);
        let risk = (entry - stop_loss).abs();
        let take_profit = entry + direction.sign() * cfg.reward_ratio * risk;

        pattern.entry = Some(entry);
        pattern.stop_loss = Some(stop_loss);
        pattern.take_profit = Some(take_profit);
        pattern.stop_loss_pips = Some(pair.to_pips(entry - stop_loss));
        pattern.take_profit_pips = Some(pair.to_pips(take_profit - entry));
    }
    pattern.valid = pattern.entry.is_some() && pattern.stop_loss.is_some() && pullback.is_some();

    debug!(
        %direction,
        touches = trendline.touch_count,
        breakout = breakout.index,
        pullback = ?pullback.map(|p| p.index),
        valid = pattern.valid,
        "Flag detected"
    );

    pattern.pole = Some(Pole {
        start_index: pole.start_index + offset,
        end_index: pole.end_index + offset,
        ..pole
    });
    pattern.consolidation = Some(Consolidation {
        start_index: consolidation.start_index + offset,
        end_index: consolidation.end_index + offset,
        ..consolidation
    });
    pattern.trendline = Some(trendline);
    pattern.breakout = Some(Breakout {
        index: breakout.index + offset,
        ..breakout
    });
    pattern.pullback = pullback.map(|p| Pullback {
        index: p.index + offset,
        ..p
    });
    pattern
}

/// Detect both orientations on one series.
pub fn detect_both(candles: &[Candle], pair: &CurrencyPair, cfg: &DetectorConfig) -> TimeframeAnalysis {
    TimeframeAnalysis {
        bullish: detect_flag(candles, Direction::Bullish, pair, cfg),
        bearish: detect_flag(candles, Direction::Bearish, pair, cfg),
    }
}
