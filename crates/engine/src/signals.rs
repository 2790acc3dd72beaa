//! Reduce pre-classified news articles and calendar events to the single
//! verdicts the decision engine consumes.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use common::{CalendarRecommendation, NewsSentiment};

/// Net score beyond which news counts as directional.
const SENTIMENT_THRESHOLD: i32 = 3;

/// A high-impact event this close ahead blocks trading.
const HIGH_IMPACT_WINDOW_MINUTES: i64 = 120;

/// More medium-impact events than this call for caution.
const MEDIUM_EVENT_LIMIT: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl Impact {
    pub fn weight(self) -> i32 {
        match self {
            Impact::High => 3,
            Impact::Medium => 2,
            Impact::Low => 1,
        }
    }
}

/// A news article already tagged with its impact and the currency it
/// reads positive for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredArticle {
    pub title: String,
    pub impact: Impact,
    /// ISO code of the currency the article favours, if any.
    #[serde(default)]
    pub positive_for: Option<String>,
    pub published_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub title: String,
    pub currency: String,
    pub impact: Impact,
    pub scheduled_at: DateTime<Utc>,
}

/// Impact-weighted base-minus-quote score mapped to a sentiment.
pub fn aggregate_news(articles: &[ScoredArticle], base: &str, quote: &str) -> NewsSentiment {
    let score_for = |currency: &str| -> i32 {
        articles
            .iter()
            .filter(|a| {
                a.positive_for
                    .as_deref()
                    .is_some_and(|c| c.eq_ignore_ascii_case(currency))
            })
            .map(|a| a.impact.weight())
            .sum()
    };

    let net = score_for(base) - score_for(quote);
    let sentiment = if net > SENTIMENT_THRESHOLD {
        NewsSentiment::Bullish
    } else if net < -SENTIMENT_THRESHOLD {
        NewsSentiment::Bearish
    } else {
        NewsSentiment::Neutral
    };

    debug!(base, quote, net, %sentiment, articles = articles.len(), "News aggregated");
    sentiment
}

/// `Avoid` when a high-impact event starts within the next two hours,
/// `Caution` when more than two medium-impact events are listed.
pub fn calendar_recommendation(events: &[CalendarEvent], now: DateTime<Utc>) -> CalendarRecommendation {
    let horizon = now + Duration::minutes(HIGH_IMPACT_WINDOW_MINUTES);
    let high_impact_soon = events
        .iter()
        .any(|e| e.impact == Impact::High && e.scheduled_at >= now && e.scheduled_at <= horizon);

    if high_impact_soon {
        return CalendarRecommendation::Avoid;
    }

    let medium = events.iter().filter(|e| e.impact == Impact::Medium).count();
    if medium > MEDIUM_EVENT_LIMIT {
        CalendarRecommendation::Caution
    } else {
        CalendarRecommendation::Proceed
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
