use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The candle source returned fewer candles than the analysis needs.
    #[error("Insufficient data: need {need} candles, got {got}")]
    InsufficientData { need: usize, got: usize },

    #[error("Invalid candle at index {index}: {reason}")]
    InvalidCandle { index: usize, reason: &'static str },

    #[error("Invalid currency pair: '{0}'")]
    InvalidPair(String),

    /// A collaborator (candle, news or calendar source) failed.
    #[error("Data source error: {0}")]
    Source(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
