use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use common::{Error, Result};

/// Tunable parameters of the flag detector and the multi-timeframe scorer.
///
/// Example `config/detector.toml`:
/// ```toml
/// lookback = 30
/// touch_tolerance = 0.0005
/// retracement_min = 0.001
/// retracement_max = 0.7
///
/// [quality]
/// base = 70
/// touch_bonus = 10
/// cap = 90
/// ```
///
/// `touch_tolerance` and the retracement band are empirical and still need
/// calibration against recorded outcomes.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Number of most recent candles analysed per timeframe.
    pub lookback: usize,
    /// First index the pole scan starts from (and distance kept from the end).
    pub pole_scan_margin: usize,
    /// Minimum candles in a pole, inclusive of both ends.
    pub min_pole_candles: usize,
    /// Minimum pole move as a fraction of its start price.
    pub min_pole_move: f64,
    /// Minimum candles in a consolidation window.
    pub min_consolidation_candles: usize,
    /// Retracement must be strictly above this fraction of the pole extreme.
    pub retracement_min: f64,
    /// Retracement must be strictly below this fraction of the pole extreme.
    pub retracement_max: f64,
    /// Touch band as a fraction of the trendline value.
    pub touch_tolerance: f64,
    /// Touches needed for a valid trendline.
    pub min_touches: usize,
    /// Take-profit distance as a multiple of the stop distance.
    pub reward_ratio: f64,
    pub quality: QualityConfig,
}

/// Pattern quality scoring for confirmed multi-timeframe patterns.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct QualityConfig {
    pub base: u8,
    /// Added per timeframe whose trendline meets `min_touches`.
    pub touch_bonus: u8,
    pub cap: u8,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            lookback: 30,
            pole_scan_margin: 5,
            min_pole_candles: 3,
            min_pole_move: 0.005,
            min_consolidation_candles: 3,
            retracement_min: 0.001,
            retracement_max: 0.7,
            touch_tolerance: 0.0005,
            min_touches: 3,
            reward_ratio: 2.0,
            quality: QualityConfig::default(),
        }
    }
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            base: 70,
            touch_bonus: 10,
            cap: 90,
        }
    }
}

impl DetectorConfig {
    /// Load from a TOML file. Missing keys take their default values.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let cfg: Self = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse detector config at '{path}': {e}")))?;
        cfg.validate()?;
        info!(path = %path, lookback = cfg.lookback, "Loaded detector config");
        Ok(cfg)
    }

    /// Load from `path` if it exists, otherwise use the defaults.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if std::path::Path::new(path).exists() {
            Self::load(path)
        } else {
            warn!(path = %path, "Detector config not found, using defaults");
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<()> {
        if self.lookback < self.pole_scan_margin * 2 + 1 {
            return Err(Error::Config(format!(
                "lookback {} too short for pole scan margin {}",
                self.lookback, self.pole_scan_margin
            )));
        }
        if self.min_pole_candles < 2 || self.min_consolidation_candles < 3 {
            return Err(Error::Config(
                "pole needs >= 2 candles and consolidation >= 3 candles".into(),
            ));
        }
        if !(0.0..1.0).contains(&self.retracement_min) || self.retracement_min >= self.retracement_max
        {
            return Err(Error::Config(format!(
                "invalid retracement band ({}, {})",
                self.retracement_min, self.retracement_max
            )));
        }
        if self.touch_tolerance < 0.0 || self.reward_ratio <= 0.0 {
            return Err(Error::Config(
                "touch_tolerance must be >= 0 and reward_ratio > 0".into(),
            ));
        }
        Ok(())
    }
}
