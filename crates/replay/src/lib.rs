use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};

use common::{
    CalendarRecommendation, CalendarSource, Candle, CandleSource, CurrencyPair, Error,
    NewsSentiment, NewsSource, Result, Timeframe,
};
use engine::{aggregate_news, calendar_recommendation, CalendarEvent, ScoredArticle};

/// Recorded market state for one or more pairs at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Clock the calendar is evaluated against.
    pub as_of: DateTime<Utc>,
    pub markets: Vec<PairSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairSnapshot {
    pub pair: CurrencyPair,
    pub price: f64,
    pub candles: HashMap<Timeframe, Vec<Candle>>,
    #[serde(default)]
    pub articles: Vec<ScoredArticle>,
    #[serde(default)]
    pub events: Vec<CalendarEvent>,
}

impl MarketSnapshot {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path.as_ref()).await?;
        let snapshot = Self::from_json(&raw)?;
        info!(
            path = %path.as_ref().display(),
            pairs = snapshot.markets.len(),
            as_of = %snapshot.as_of,
            "Snapshot loaded"
        );
        Ok(snapshot)
    }
}

/// Serves candles, prices, news and calendar verdicts from a snapshot.
///
/// Cloning shares the underlying state, so a clone handed to the analyzer
/// sees later `update_price`/`push_candle` calls.
#[derive(Clone)]
pub struct ReplayFeed {
    as_of: Arc<RwLock<DateTime<Utc>>>,
    markets: Arc<RwLock<HashMap<CurrencyPair, PairSnapshot>>>,
}

impl ReplayFeed {
    pub fn new(snapshot: MarketSnapshot) -> Self {
        let markets = snapshot
            .markets
            .into_iter()
            .map(|m| (m.pair.clone(), m))
            .collect();
        Self {
            as_of: Arc::new(RwLock::new(snapshot.as_of)),
            markets: Arc::new(RwLock::new(markets)),
        }
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(MarketSnapshot::load(path).await?))
    }

    /// Pairs available in the snapshot, sorted for stable output.
    pub async fn pairs(&self) -> Vec<CurrencyPair> {
        let mut pairs: Vec<CurrencyPair> = self.markets.read().await.keys().cloned().collect();
        pairs.sort_by_key(|p| p.to_string());
        pairs
    }

    pub async fn update_price(&self, pair: &CurrencyPair, price: f64) -> Result<()> {
        let mut markets = self.markets.write().await;
        let market = markets.get_mut(pair).ok_or_else(|| unknown(pair))?;
        market.price = price;
        Ok(())
    }

    /// Append a closed candle. Ordering is checked when the series is
    /// analysed, not here.
    pub async fn push_candle(&self, pair: &CurrencyPair, timeframe: Timeframe, candle: Candle) -> Result<()> {
        let mut markets = self.markets.write().await;
        let market = markets.get_mut(pair).ok_or_else(|| unknown(pair))?;
        market.candles.entry(timeframe).or_default().push(candle);
        debug!(%pair, %timeframe, close = candle.close, "Candle appended");
        Ok(())
    }

    pub async fn advance_clock(&self, to: DateTime<Utc>) {
        *self.as_of.write().await = to;
    }
}

fn unknown(pair: &CurrencyPair) -> Error {
    Error::Source(format!("snapshot has no data for {pair}"))
}

#[async_trait]
impl CandleSource for ReplayFeed {
    async fn candles(&self, pair: &CurrencyPair, timeframe: Timeframe) -> Result<Vec<Candle>> {
        let markets = self.markets.read().await;
        let market = markets.get(pair).ok_or_else(|| unknown(pair))?;
        market
            .candles
            .get(&timeframe)
            .cloned()
            .ok_or_else(|| Error::Source(format!("snapshot has no {timeframe} candles for {pair}")))
    }

    async fn current_price(&self, pair: &CurrencyPair) -> Result<f64> {
        let markets = self.markets.read().await;
        markets.get(pair).map(|m| m.price).ok_or_else(|| unknown(pair))
    }
}

#[async_trait]
impl NewsSource for ReplayFeed {
    async fn sentiment(&self, pair: &CurrencyPair) -> Result<NewsSentiment> {
        let markets = self.markets.read().await;
        let market = markets.get(pair).ok_or_else(|| unknown(pair))?;
        Ok(aggregate_news(&market.articles, &pair.base, &pair.quote))
    }
}

#[async_trait]
impl CalendarSource for ReplayFeed {
    async fn recommendation(&self, pair: &CurrencyPair) -> Result<CalendarRecommendation> {
        let now = *self.as_of.read().await;
        let markets = self.markets.read().await;
        let market = markets.get(pair).ok_or_else(|| unknown(pair))?;
        Ok(calendar_recommendation(&market.events, now))
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    const SNAPSHOT: &str = r#"{
        "as_of": "2024-06-05T10:00:00Z",
        "markets": [{
            "pair": "GBP/USD",
            "price": 1.2700,
            "candles": {
                "1h": [
                    {"timestamp": "2024-06-05T08:00:00Z", "open": 1.2690, "high": 1.2705, "low": 1.2685, "close": 1.2700}
                ]
            },
            "articles": [
                {"title": "BoE hawkish", "impact": "HIGH", "positive_for": "GBP", "published_at": "2024-06-05T07:00:00Z"},
                {"title": "UK wages beat", "impact": "MEDIUM", "positive_for": "GBP", "published_at": "2024-06-05T07:30:00Z"}
            ],
            "events": [
                {"title": "US CPI", "currency": "USD", "impact": "HIGH", "scheduled_at": "2024-06-05T11:30:00Z"}
            ]
        }]
    }"#;

    fn gbpusd() -> CurrencyPair {
        CurrencyPair::new("GBP", "USD")
    }

    fn feed() -> ReplayFeed {
        ReplayFeed::new(MarketSnapshot::from_json(SNAPSHOT).unwrap())
    }

    #[tokio::test]
    async fn serves_snapshot_candles_and_price() {
        let feed = feed();
        let candles = feed.candles(&gbpusd(), Timeframe::H1).await.unwrap();
        assert_eq!(candles.len(), 1);
        assert_eq!(feed.current_price(&gbpusd()).await.unwrap(), 1.27);
    }

    #[tokio::test]
    async fn missing_timeframe_is_a_source_error() {
        let err = feed().candles(&gbpusd(), Timeframe::H4).await.unwrap_err();
        assert!(matches!(err, Error::Source(_)));
    }

    #[tokio::test]
    async fn unknown_pair_is_a_source_error() {
        let err = feed().current_price(&CurrencyPair::new("AUD", "NZD")).await.unwrap_err();
        assert!(matches!(err, Error::Source(_)));
    }

    #[tokio::test]
    async fn news_and_calendar_are_aggregated() {
        let feed = feed();
        assert_eq!(feed.sentiment(&gbpusd()).await.unwrap(), NewsSentiment::Bullish);
        assert_eq!(
            feed.recommendation(&gbpusd()).await.unwrap(),
            CalendarRecommendation::Avoid
        );

        // After the release the calendar clears.
        let later = Utc.with_ymd_and_hms(2024, 6, 5, 12, 0, 0).unwrap();
        feed.advance_clock(later).await;
        assert_eq!(
            feed.recommendation(&gbpusd()).await.unwrap(),
            CalendarRecommendation::Proceed
        );
    }

    #[tokio::test]
    async fn clones_share_updates() {
        let feed = feed();
        let view = feed.clone();

        feed.update_price(&gbpusd(), 1.2750).await.unwrap();
        let last = view.candles(&gbpusd(), Timeframe::H1).await.unwrap()[0];
        feed.push_candle(&gbpusd(), Timeframe::H1, Candle { timestamp: last.timestamp + Duration::hours(1), ..last })
            .await
            .unwrap();

        assert_eq!(view.current_price(&gbpusd()).await.unwrap(), 1.275);
        assert_eq!(view.candles(&gbpusd(), Timeframe::H1).await.unwrap().len(), 2);
    }
}
