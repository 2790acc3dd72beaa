use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use common::{
    validate_candles, CalendarSource, CandleSource, Config, CurrencyPair, NewsSource, Result,
    Timeframe,
};
use risk::{estimate_spread, validate_target, PositionRequest, PositionSizer, PositionSizing};
use strategy::{analyze_timeframes, technical, DetectorConfig, MultiTimeframeResult};

use crate::decision::{decide, Decision};
use crate::report::AnalysisReport;

/// Candles kept in the report for charting.
const RECENT_CANDLES: usize = 20;

/// Account parameters used for sizing and target checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSettings {
    pub balance: f64,
    pub risk_percent: f64,
    pub currency: String,
    pub target_profit: f64,
}

impl Default for AccountSettings {
    fn default() -> Self {
        Self {
            balance: 1_000.0,
            risk_percent: 2.0,
            currency: "GBP".to_string(),
            target_profit: 50.0,
        }
    }
}

impl From<&Config> for AccountSettings {
    fn from(config: &Config) -> Self {
        Self {
            balance: config.account_balance,
            risk_percent: config.risk_percent,
            currency: config.account_currency.clone(),
            target_profit: config.target_profit,
        }
    }
}

/// Runs the full analysis for a pair against injected data sources.
pub struct Analyzer {
    candles: Arc<dyn CandleSource>,
    news: Arc<dyn NewsSource>,
    calendar: Arc<dyn CalendarSource>,
    detector: DetectorConfig,
    account: AccountSettings,
    structural_timeframe: Timeframe,
    entry_timeframe: Timeframe,
}

impl Analyzer {
    pub fn new(
        candles: Arc<dyn CandleSource>,
        news: Arc<dyn NewsSource>,
        calendar: Arc<dyn CalendarSource>,
        detector: DetectorConfig,
        account: AccountSettings,
    ) -> Self {
        Self {
            candles,
            news,
            calendar,
            detector,
            account,
            structural_timeframe: Timeframe::H4,
            entry_timeframe: Timeframe::H1,
        }
    }

    /// Override the default 4h structural / 1h entry pairing.
    pub fn with_timeframes(mut self, structural: Timeframe, entry: Timeframe) -> Self {
        self.structural_timeframe = structural;
        self.entry_timeframe = entry;
        self
    }

    /// Fetch, detect, decide and size.
    ///
    /// Fails only when a source fails or returns candles that break the
    /// input contract. A missing pattern is a WAIT report, not an error.
    pub async fn run(&self, pair: &CurrencyPair) -> Result<AnalysisReport> {
        info!(%pair, structural = %self.structural_timeframe, entry = %self.entry_timeframe, "Starting analysis");

        let (structural, entry) = tokio::try_join!(
            self.candles.candles(pair, self.structural_timeframe),
            self.candles.candles(pair, self.entry_timeframe),
        )?;
        validate_candles(&structural, self.detector.lookback)?;
        validate_candles(&entry, self.detector.lookback)?;
        debug!(structural = structural.len(), entry = entry.len(), "Candles validated");

        let pattern = analyze_timeframes(&structural, &entry, pair, &self.detector);

        let (news, calendar) = tokio::try_join!(
            self.news.sentiment(pair),
            self.calendar.recommendation(pair),
        )?;

        let decision = decide(&pattern, news, calendar);
        let position = self.size_position(pair, &pattern, &decision).await?;

        let report = AnalysisReport {
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            pair: pair.clone(),
            technical: technical::analyze(&entry),
            target: validate_target(self.account.balance, self.account.target_profit),
            recent_candles: entry[entry.len().saturating_sub(RECENT_CANDLES)..].to_vec(),
            decision,
            pattern,
            position,
            news,
            calendar,
        };

        info!(
            %pair,
            id = %report.id,
            action = %report.decision.action,
            quality = report.pattern.pattern_quality,
            "Analysis complete"
        );
        Ok(report)
    }

    async fn size_position(
        &self,
        pair: &CurrencyPair,
        pattern: &MultiTimeframeResult,
        decision: &Decision,
    ) -> Result<Option<PositionSizing>> {
        let (Some(direction), Some(stop_loss_pips)) = (decision.direction, pattern.stop_loss_pips) else {
            return Ok(None);
        };
        if !decision.is_trade() {
            return Ok(None);
        }

        let current_price = self.candles.current_price(pair).await?;
        let spread_pips = estimate_spread(pair, Utc::now());

        let sizing = PositionSizer::new(self.account.currency.as_str()).size(&PositionRequest {
            account_balance: self.account.balance,
            risk_percent: self.account.risk_percent,
            stop_loss_pips,
            current_price,
            pair: pair.clone(),
            direction,
            spread_pips,
        });
        Ok(Some(sizing))
    }
}
