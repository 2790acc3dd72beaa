//! Flag pattern recognition over a single candle series.
//!
//! Stages run in order and each consumes the previous stage's result:
//! pole → consolidation → trendline → breakout → pullback. A stage that
//! finds nothing ends the chain with a not-detected pattern.

pub mod breakout;
pub mod consolidation;
pub mod detector;
pub mod pole;
pub mod trendline;

pub use breakout::{find_breakout, find_pullback, Breakout, Pullback};
pub use consolidation::{find_consolidation, Consolidation};
pub use detector::{detect_both, detect_flag, FlagPattern, TimeframeAnalysis};
pub use pole::{find_poles, latest_pole, Pole};
pub use trendline::{count_touches, fit_trendline, TrendlineFit};
