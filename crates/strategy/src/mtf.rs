use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use common::{Candle, CurrencyPair, Direction, PatternDirection};

use crate::config::DetectorConfig;
use crate::flag::{detect_both, FlagPattern, TimeframeAnalysis};

/// Outcome of checking a flag on a structural and an entry timeframe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiTimeframeResult {
    pub pattern_detected: bool,
    pub direction: PatternDirection,
    pub entry: Option<f64>,
    pub stop_loss: Option<f64>,
    pub take_profit: Option<f64>,
    pub stop_loss_pips: Option<f64>,
    pub take_profit_pips: Option<f64>,
    /// 0..=cap (90 by default).
    pub pattern_quality: u8,
    pub valid_trade: bool,
    pub structural_analysis: TimeframeAnalysis,
    pub entry_analysis: TimeframeAnalysis,
}

/// Combine a structural-timeframe and an entry-timeframe analysis.
///
/// A direction is confirmed only when both timeframes detected it; bullish
/// is checked first. Price levels come from the entry timeframe when it
/// has them and from the structural timeframe otherwise.
pub fn confirm(
    structural: &TimeframeAnalysis,
    entry: &TimeframeAnalysis,
    pair: &CurrencyPair,
    cfg: &DetectorConfig,
) -> MultiTimeframeResult {
    let mut result = MultiTimeframeResult {
        pattern_detected: false,
        direction: PatternDirection::Neutral,
        entry: None,
        stop_loss: None,
        take_profit: None,
        stop_loss_pips: None,
        take_profit_pips: None,
        pattern_quality: 0,
        valid_trade: false,
        structural_analysis: structural.clone(),
        entry_analysis: entry.clone(),
    };

    let confirmed = [Direction::Bullish, Direction::Bearish]
        .into_iter()
        .find(|&d| structural.get(d).detected && entry.get(d).detected);

    let Some(direction) = confirmed else {
        debug!(%pair, "No direction confirmed on both timeframes");
        return result;
    };

    let higher = structural.get(direction);
    let lower = entry.get(direction);

    result.pattern_detected = true;
    result.direction = direction.trade_direction().into();
    result.entry = lower.entry.or(higher.entry);
    result.stop_loss = lower.stop_loss.or(higher.stop_loss);

    if let (Some(entry_price), Some(stop)) = (result.entry, result.stop_loss) {
        let pip = pair.pip_size();
        let stop_pips = ((entry_price - stop).abs() / pip).round();
        let target_pips = stop_pips * cfg.reward_ratio;

        result.stop_loss_pips = Some(stop_pips);
        result.take_profit_pips = Some(target_pips);
        result.take_profit = Some(entry_price + direction.sign() * target_pips * pip);
        result.valid_trade = lower.valid;
    }

    result.pattern_quality = quality(higher, lower, cfg);

    info!(
        %pair,
        direction = %result.direction,
        quality = result.pattern_quality,
        valid_trade = result.valid_trade,
        "Flag confirmed on both timeframes"
    );
    result
}

/// Run the detector on both series and confirm.
pub fn analyze_timeframes(
    structural_candles: &[Candle],
    entry_candles: &[Candle],
    pair: &CurrencyPair,
    cfg: &DetectorConfig,
) -> MultiTimeframeResult {
    let structural = detect_both(structural_candles, pair, cfg);
    let entry = detect_both(entry_candles, pair, cfg);
    confirm(&structural, &entry, pair, cfg)
}

fn quality(structural: &FlagPattern, entry: &FlagPattern, cfg: &DetectorConfig) -> u8 {
    let q = &cfg.quality;
    let bonus = [structural, entry]
        .iter()
        .filter(|p| p.touch_count() >= cfg.min_touches)
        .count() as u8;
    q.base.saturating_add(bonus.saturating_mul(q.touch_bonus)).min(q.cap)
}
