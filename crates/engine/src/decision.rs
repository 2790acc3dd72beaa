use serde::{Deserialize, Serialize};
use tracing::info;

use common::{Action, CalendarRecommendation, NewsSentiment, TradeDirection};
use strategy::MultiTimeframeResult;

pub const AVOID_REASON: &str = "High impact economic event scheduled";
pub const AVOID_RISK: &str = "Economic calendar shows high-risk period";
pub const CAUTION_RISK: &str = "Multiple economic events today - exercise caution";
pub const CONFLICT_RISK: &str = "Technical and fundamental analysis conflict";

/// Trade verdict with the reasons behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub action: Action,
    pub direction: Option<TradeDirection>,
    pub confidence: u8,
    pub reasoning: Vec<String>,
    pub risks: Vec<String>,
}

impl Decision {
    fn wait() -> Self {
        Self {
            action: Action::Wait,
            direction: None,
            confidence: 0,
            reasoning: Vec::new(),
            risks: Vec::new(),
        }
    }

    pub fn is_trade(&self) -> bool {
        self.action == Action::Trade
    }
}

/// Fuse the confirmed pattern with the news and calendar verdicts.
///
/// An `Avoid` calendar wins over everything, including a perfect pattern.
/// Otherwise a confirmed pattern with a pullback entry trades at its
/// quality score; anything else waits.
pub fn decide(
    pattern: &MultiTimeframeResult,
    news: NewsSentiment,
    calendar: CalendarRecommendation,
) -> Decision {
    let mut decision = Decision::wait();

    if calendar == CalendarRecommendation::Avoid {
        decision.reasoning.push(AVOID_REASON.to_string());
        decision.risks.push(AVOID_RISK.to_string());
        info!(action = %decision.action, "Calendar blocks trading");
        return decision;
    }

    let direction = pattern.direction.trade_direction();

    match direction {
        Some(dir) if pattern.pattern_detected && pattern.valid_trade => {
            decision.action = Action::Trade;
            decision.direction = Some(dir);
            decision.confidence = pattern.pattern_quality;
            decision
                .reasoning
                .push("Flag pattern confirmed on structural and entry timeframes".to_string());
            decision
                .reasoning
                .push("Trendline confirmed with at least 3 touches".to_string());
            decision.reasoning.push(format!("{dir} entry on pullback to breakout level"));
            if let (Some(sl), Some(tp)) = (pattern.stop_loss_pips, pattern.take_profit_pips) {
                decision
                    .reasoning
                    .push(format!("Stop loss {sl} pips, take profit {tp} pips (2:1)"));
            }
            if news.favoured() == Some(dir) {
                decision.reasoning.push(format!("News sentiment {news} supports the trade"));
            }
        }
        _ if pattern.pattern_detected => {
            decision
                .reasoning
                .push("Flag pattern detected but waiting for pullback entry".to_string());
        }
        _ => {
            decision.reasoning.push("No flag pattern forming".to_string());
        }
    }

    if calendar == CalendarRecommendation::Caution {
        decision.risks.push(CAUTION_RISK.to_string());
    }
    if let (Some(dir), Some(favoured)) = (direction, news.favoured()) {
        if dir != favoured {
            decision.risks.push(CONFLICT_RISK.to_string());
        }
    }

    info!(
        action = %decision.action,
        direction = ?decision.direction,
        confidence = decision.confidence,
        risks = decision.risks.len(),
        "Decision made"
    );
    decision
}

// ─── Tests ────────────────────────────────────────────────────────────────────
