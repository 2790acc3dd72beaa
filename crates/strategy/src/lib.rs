pub mod config;
pub mod flag;
pub mod indicators;
pub mod mtf;
pub mod technical;

pub use config::{DetectorConfig, QualityConfig};
pub use flag::{detect_both, detect_flag, FlagPattern, TimeframeAnalysis};
pub use mtf::{analyze_timeframes, confirm, MultiTimeframeResult};
pub use technical::{TechnicalReport, TechnicalSnapshot, TechnicalSummary, Trend};
