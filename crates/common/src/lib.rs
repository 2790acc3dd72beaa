pub mod candle;
pub mod config;
pub mod error;
pub mod feed;
pub mod pair;
pub mod types;

pub use candle::{validate_candles, Candle};
pub use config::Config;
pub use error::{Error, Result};
pub use feed::{CalendarSource, CandleSource, NewsSource};
pub use pair::CurrencyPair;
pub use types::*;
