use serde::{Deserialize, Serialize};

/// Orientation of a flag pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Bullish,
    Bearish,
}

impl Direction {
    pub fn trade_direction(self) -> TradeDirection {
        match self {
            Direction::Bullish => TradeDirection::Buy,
            Direction::Bearish => TradeDirection::Sell,
        }
    }

    /// +1.0 for bullish, -1.0 for bearish. Multiplies price moves so one
    /// formula serves both orientations.
    pub fn sign(self) -> f64 {
        match self {
            Direction::Bullish => 1.0,
            Direction::Bearish => -1.0,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Bullish => write!(f, "bullish"),
            Direction::Bearish => write!(f, "bearish"),
        }
    }
}

/// Side of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeDirection {
    Buy,
    Sell,
}

impl TradeDirection {
    pub fn sign(self) -> f64 {
        match self {
            TradeDirection::Buy => 1.0,
            TradeDirection::Sell => -1.0,
        }
    }
}

impl std::fmt::Display for TradeDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeDirection::Buy => write!(f, "BUY"),
            TradeDirection::Sell => write!(f, "SELL"),
        }
    }
}

/// Direction reported by the multi-timeframe confirmer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PatternDirection {
    Buy,
    Sell,
    #[default]
    Neutral,
}

impl PatternDirection {
    pub fn trade_direction(self) -> Option<TradeDirection> {
        match self {
            PatternDirection::Buy => Some(TradeDirection::Buy),
            PatternDirection::Sell => Some(TradeDirection::Sell),
            PatternDirection::Neutral => None,
        }
    }
}

impl From<TradeDirection> for PatternDirection {
    fn from(side: TradeDirection) -> Self {
        match side {
            TradeDirection::Buy => PatternDirection::Buy,
            TradeDirection::Sell => PatternDirection::Sell,
        }
    }
}

impl std::fmt::Display for PatternDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatternDirection::Buy => write!(f, "BUY"),
            PatternDirection::Sell => write!(f, "SELL"),
            PatternDirection::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

/// Aggregated news verdict for a pair, supplied by the news collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NewsSentiment {
    Bullish,
    Bearish,
    #[default]
    Neutral,
}

impl NewsSentiment {
    /// The trade direction this sentiment favours, if any.
    pub fn favoured(self) -> Option<TradeDirection> {
        match self {
            NewsSentiment::Bullish => Some(TradeDirection::Buy),
            NewsSentiment::Bearish => Some(TradeDirection::Sell),
            NewsSentiment::Neutral => None,
        }
    }
}

impl std::fmt::Display for NewsSentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NewsSentiment::Bullish => write!(f, "BULLISH"),
            NewsSentiment::Bearish => write!(f, "BEARISH"),
            NewsSentiment::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

/// Economic-calendar verdict for a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CalendarRecommendation {
    #[default]
    Proceed,
    Caution,
    Avoid,
}

impl std::fmt::Display for CalendarRecommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalendarRecommendation::Proceed => write!(f, "PROCEED"),
            CalendarRecommendation::Caution => write!(f, "CAUTION"),
            CalendarRecommendation::Avoid => write!(f, "AVOID"),
        }
    }
}

/// Candle interval requested from the candle source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "15m")]
    M15,
    #[serde(rename = "1h")]
    H1,
    #[serde(rename = "4h")]
    H4,
    #[serde(rename = "1d")]
    D1,
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Timeframe::M15 => write!(f, "15m"),
            Timeframe::H1 => write!(f, "1h"),
            Timeframe::H4 => write!(f, "4h"),
            Timeframe::D1 => write!(f, "1d"),
        }
    }
}

/// Final verdict of the decision engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    Wait,
    Trade,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Wait => write!(f, "WAIT"),
            Action::Trade => write!(f, "TRADE"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_are_uppercase() {
        assert_eq!(serde_json::to_string(&TradeDirection::Buy).unwrap(), "\"BUY\"");
        assert_eq!(
            serde_json::to_string(&CalendarRecommendation::Avoid).unwrap(),
            "\"AVOID\""
        );
        let s: NewsSentiment = serde_json::from_str("\"BEARISH\"").unwrap();
        assert_eq!(s, NewsSentiment::Bearish);
        let tf: Timeframe = serde_json::from_str("\"4h\"").unwrap();
        assert_eq!(tf, Timeframe::H4);
    }

    #[test]
    fn sentiment_maps_to_favoured_side() {
        assert_eq!(NewsSentiment::Bullish.favoured(), Some(TradeDirection::Buy));
        assert_eq!(NewsSentiment::Neutral.favoured(), None);
        assert_eq!(Direction::Bearish.trade_direction(), TradeDirection::Sell);
    }
}
