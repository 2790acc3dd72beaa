use async_trait::async_trait;

use crate::{CalendarRecommendation, Candle, CurrencyPair, NewsSentiment, Result, Timeframe};

/// Supplies normalized candles for a pair and interval.
///
/// Implementations must return candles oldest first, gap-free for the
/// requested interval. Retrying a failed fetch is the implementation's job;
/// the analysis core never retries.
#[async_trait]
pub trait CandleSource: Send + Sync {
    async fn candles(&self, pair: &CurrencyPair, timeframe: Timeframe) -> Result<Vec<Candle>>;

    /// Latest quoted price for the pair.
    async fn current_price(&self, pair: &CurrencyPair) -> Result<f64>;
}

/// Supplies an already-aggregated news verdict for a pair.
#[async_trait]
pub trait NewsSource: Send + Sync {
    async fn sentiment(&self, pair: &CurrencyPair) -> Result<NewsSentiment>;
}

/// Supplies an already-aggregated economic-calendar verdict for a pair.
#[async_trait]
pub trait CalendarSource: Send + Sync {
    async fn recommendation(&self, pair: &CurrencyPair) -> Result<CalendarRecommendation>;
}
