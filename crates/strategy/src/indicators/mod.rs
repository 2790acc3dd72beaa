pub mod atr;
pub mod bollinger;
pub mod macd;
pub mod moving_average;
pub mod rsi;
pub mod stochastic;

pub use atr::Atr;
pub use bollinger::{Bollinger, BollingerValue};
pub use macd::{Macd, MacdBias, MacdValue};
pub use moving_average::{ema, ema_series, sma, sma_series};
pub use rsi::{Rsi, RsiZone};
pub use stochastic::{Stochastic, StochasticValue};
