//! Indicator snapshot and a simple vote over it.
//!
//! Shown alongside the flag analysis as context. Nothing here feeds the
//! trade decision.

use serde::{Deserialize, Serialize};

use common::{Candle, PatternDirection};

use crate::indicators::{
    ema, sma, Atr, Bollinger, BollingerValue, Macd, MacdBias, MacdValue, Rsi, RsiZone, Stochastic,
    StochasticValue,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Trend {
    Uptrend,
    Downtrend,
    Sideways,
}

/// Latest value of every indicator. A field is `None` when the series is
/// too short for that indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalSnapshot {
    pub current_price: f64,
    pub rsi: Option<f64>,
    pub macd: Option<MacdValue>,
    pub bollinger: Option<BollingerValue>,
    pub sma20: Option<f64>,
    pub sma50: Option<f64>,
    pub ema9: Option<f64>,
    pub atr: Option<f64>,
    pub stochastic: Option<StochasticValue>,
    pub trend: Trend,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalSummary {
    pub direction: PatternDirection,
    pub bullish_signals: u32,
    pub bearish_signals: u32,
    /// Distance of the bullish share from 50%, in percent.
    pub confidence: f64,
    pub signals: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalReport {
    pub snapshot: TechnicalSnapshot,
    pub summary: TechnicalSummary,
}

/// Compute the snapshot for `candles`. `None` for an empty series.
pub fn snapshot(candles: &[Candle]) -> Option<TechnicalSnapshot> {
    let current_price = candles.last()?.close;
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();

    let sma20 = sma(&closes, 20);
    let sma50 = sma(&closes, 50);

    Some(TechnicalSnapshot {
        current_price,
        rsi: Rsi::default().latest(&closes),
        macd: Macd::default().latest(&closes),
        bollinger: Bollinger::default().latest(&closes),
        sma20,
        sma50,
        ema9: ema(&closes, 9),
        atr: Atr::default().latest(candles),
        stochastic: Stochastic::default().latest(candles),
        trend: trend(current_price, sma20, sma50),
    })
}

fn trend(price: f64, sma20: Option<f64>, sma50: Option<f64>) -> Trend {
    match (sma20, sma50) {
        (Some(s20), Some(s50)) if price > s20 && s20 > s50 => Trend::Uptrend,
        (Some(s20), Some(s50)) if price < s20 && s20 < s50 => Trend::Downtrend,
        _ => Trend::Sideways,
    }
}

/// Count bullish and bearish readings in a snapshot.
pub fn summarize(snapshot: &TechnicalSnapshot) -> TechnicalSummary {
    let mut bullish = 0u32;
    let mut bearish = 0u32;
    let mut signals = Vec::new();

    let mut vote = |is_bullish: bool, text: &str| {
        if is_bullish {
            bullish += 1;
        } else {
            bearish += 1;
        }
        signals.push(text.to_string());
    };

    if let Some(rsi) = snapshot.rsi {
        match Rsi::default().zone(rsi) {
            RsiZone::Oversold => vote(true, "RSI oversold (bullish)"),
            RsiZone::Overbought => vote(false, "RSI overbought (bearish)"),
            RsiZone::Neutral => {}
        }
    }

    match snapshot.macd.map(|m| m.bias()) {
        Some(MacdBias::Bullish) => vote(true, "MACD bullish crossover"),
        Some(MacdBias::Bearish) => vote(false, "MACD bearish crossover"),
        _ => {}
    }

    if let Some(bb) = snapshot.bollinger {
        if snapshot.current_price < bb.lower {
            vote(true, "Price below lower Bollinger Band (oversold)");
        } else if snapshot.current_price > bb.upper {
            vote(false, "Price above upper Bollinger Band (overbought)");
        }
    }

    match snapshot.trend {
        Trend::Uptrend => vote(true, "Price in uptrend"),
        Trend::Downtrend => vote(false, "Price in downtrend"),
        Trend::Sideways => {}
    }

    if let Some(stoch) = snapshot.stochastic {
        if stoch.k < 20.0 {
            vote(true, "Stochastic oversold");
        } else if stoch.k > 80.0 {
            vote(false, "Stochastic overbought");
        }
    }

    let total = bullish + bearish;
    let bullish_pct = if total > 0 {
        bullish as f64 / total as f64 * 100.0
    } else {
        50.0
    };

    let direction = if bullish_pct > 60.0 {
        PatternDirection::Buy
    } else if bullish_pct < 40.0 {
        PatternDirection::Sell
    } else {
        PatternDirection::Neutral
    };

    TechnicalSummary {
        direction,
        bullish_signals: bullish,
        bearish_signals: bearish,
        confidence: (bullish_pct - 50.0).abs(),
        signals,
    }
}

/// Snapshot plus summary.
pub fn analyze(candles: &[Candle]) -> Option<TechnicalReport> {
    let snapshot = snapshot(candles)?;
    let summary = summarize(&snapshot);
    Some(TechnicalReport { snapshot, summary })
}

// ─── Tests ────────────────────────────────────────────────────────────────────
