use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use common::{CalendarRecommendation, Candle, CurrencyPair, NewsSentiment, Result};
use risk::{PositionSizing, TargetValidation};
use strategy::{MultiTimeframeResult, TechnicalReport};

use crate::decision::Decision;

/// Everything one analysis run produced, ready to serve or print.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub pair: CurrencyPair,
    pub decision: Decision,
    pub pattern: MultiTimeframeResult,
    /// Indicator context from the entry timeframe.
    pub technical: Option<TechnicalReport>,
    /// Present only for TRADE decisions.
    pub position: Option<PositionSizing>,
    pub target: TargetValidation,
    pub news: NewsSentiment,
    pub calendar: CalendarRecommendation,
    /// Tail of the entry-timeframe series, for charting.
    pub recent_candles: Vec<Candle>,
}

impl AnalysisReport {
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
