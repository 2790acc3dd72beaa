use serde::{Deserialize, Serialize};
use tracing::debug;

use common::{CurrencyPair, TradeDirection};

/// Units of base currency in one standard lot.
pub const STANDARD_LOT_UNITS: f64 = 100_000.0;

/// Target reward as a multiple of the stop distance.
pub const REWARD_RATIO: f64 = 2.0;

/// Inputs for sizing one trade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionRequest {
    pub account_balance: f64,
    /// Percent of balance put at risk, e.g. 2.0 for 2%.
    pub risk_percent: f64,
    pub stop_loss_pips: f64,
    /// Quoted (mid) price of the pair.
    pub current_price: f64,
    pub pair: CurrencyPair,
    pub direction: TradeDirection,
    pub spread_pips: f64,
}

/// Sized position with spread-adjusted price levels for `direction`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSizing {
    pub account_balance: f64,
    pub risk_percent: f64,
    pub risk_amount: f64,
    /// Lots that risk exactly `risk_amount`, floored to 0.01.
    pub calculated_lot_size: f64,
    /// Lots from the balance tier table.
    pub recommended_lot_size: f64,
    pub stop_loss_pips: f64,
    pub take_profit_pips: f64,
    pub spread_pips: f64,
    /// Account-currency value of one pip on one standard lot.
    pub pip_value: f64,
    pub pair: CurrencyPair,
    pub direction: TradeDirection,
    pub projected_profit: f64,
    /// Nominal ratio before spread.
    pub risk_reward_ratio: f64,
    /// Ratio after the spread moves the entry, two decimals.
    pub true_risk_reward_ratio: f64,
    pub entry_price: f64,
    pub stop_loss_price: f64,
    pub take_profit_price: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetValidation {
    pub is_realistic: bool,
    pub profit_percent: f64,
}

#[derive(Debug, Clone, Copy)]
struct PriceSet {
    entry: f64,
    stop_loss: f64,
    take_profit: f64,
}

/// Sizes positions for an account denominated in one currency.
#[derive(Debug, Clone)]
pub struct PositionSizer {
    account_currency: String,
}

impl PositionSizer {
    pub fn new(account_currency: impl Into<String>) -> Self {
        Self {
            account_currency: account_currency.into().to_uppercase(),
        }
    }

    /// Size a position. Does not validate its inputs: a zero stop yields
    /// non-finite lot sizes rather than an error.
    pub fn size(&self, req: &PositionRequest) -> PositionSizing {
        let risk_amount = req.account_balance * req.risk_percent / 100.0;
        let take_profit_pips = req.stop_loss_pips * REWARD_RATIO;

        let pip_value = pip_value_per_lot(&req.pair, req.current_price, &self.account_currency);
        let raw_lots = risk_amount / (req.stop_loss_pips * pip_value);
        let calculated_lot_size = (raw_lots * 100.0).floor() / 100.0;

        let recommended_lot_size = standard_lot_size(req.account_balance);
        let projected_profit = take_profit_pips * recommended_lot_size * pip_value;

        let buy = price_set(req, take_profit_pips, TradeDirection::Buy);
        let sell = price_set(req, take_profit_pips, TradeDirection::Sell);
        let chosen = match req.direction {
            TradeDirection::Buy => buy,
            TradeDirection::Sell => sell,
        };

        let risk = (chosen.entry - chosen.stop_loss).abs();
        let reward = (chosen.take_profit - chosen.entry).abs();
        let true_risk_reward_ratio = if risk > 0.0 {
            (reward / risk * 100.0).round() / 100.0
        } else {
            0.0
        };

        debug!(
            pair = %req.pair,
            direction = %req.direction,
            risk_amount,
            lots = calculated_lot_size,
            true_rr = true_risk_reward_ratio,
            "Position sized"
        );

        PositionSizing {
            account_balance: req.account_balance,
            risk_percent: req.risk_percent,
            risk_amount,
            calculated_lot_size,
            recommended_lot_size,
            stop_loss_pips: req.stop_loss_pips,
            take_profit_pips,
            spread_pips: req.spread_pips,
            pip_value,
            pair: req.pair.clone(),
            direction: req.direction,
            projected_profit,
            risk_reward_ratio: REWARD_RATIO,
            true_risk_reward_ratio,
            entry_price: req.pair.round_price(chosen.entry),
            stop_loss_price: req.pair.round_price(chosen.stop_loss),
            take_profit_price: req.pair.round_price(chosen.take_profit),
        }
    }
}

/// Entry pays the spread; stop and target stay at their nominal distance
/// from the quoted price, so the spread eats into the reward and adds to
/// the risk.
fn price_set(req: &PositionRequest, take_profit_pips: f64, direction: TradeDirection) -> PriceSet {
    let pip = req.pair.pip_size();
    let sign = direction.sign();
    PriceSet {
        entry: req.current_price + sign * req.spread_pips * pip,
        stop_loss: req.current_price - sign * req.stop_loss_pips * pip,
        take_profit: req.current_price + sign * take_profit_pips * pip,
    }
}

/// Value of one pip on one standard lot, in the account currency.
///
/// Exact when the account currency is one of the legs. Crosses are
/// approximated by treating the base currency as the account currency.
pub fn pip_value_per_lot(pair: &CurrencyPair, price: f64, account_currency: &str) -> f64 {
    let per_quote = STANDARD_LOT_UNITS * pair.pip_size();
    if pair.quote.eq_ignore_ascii_case(account_currency) {
        per_quote
    } else {
        per_quote / price
    }
}

/// Lot size by balance tier: 0.1 below 2 000, +0.1 per further 1 000 up to
/// 0.9 below 10 000, then 1.0 per full 10 000.
pub fn standard_lot_size(balance: f64) -> f64 {
    if balance < 10_000.0 {
        let tier = (balance / 1_000.0).floor().clamp(1.0, 9.0);
        tier / 10.0
    } else {
        (balance / 10_000.0).floor()
    }
}

/// Every target is accepted; the 2:1 strategy decides feasibility per trade.
pub fn validate_target(account_balance: f64, target_profit: f64) -> TargetValidation {
    TargetValidation {
        is_realistic: true,
        profit_percent: target_profit * 100.0 / account_balance,
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
