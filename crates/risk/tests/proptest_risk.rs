use proptest::prelude::*;

use common::{CurrencyPair, TradeDirection};
use risk::{standard_lot_size, PositionRequest, PositionSizer};

fn pair() -> impl Strategy<Value = CurrencyPair> {
    prop_oneof![
        Just(CurrencyPair::new("EUR", "USD")),
        Just(CurrencyPair::new("GBP", "JPY")),
        Just(CurrencyPair::new("EUR", "GBP")),
        Just(CurrencyPair::new("AUD", "CAD")),
    ]
}

fn side() -> impl Strategy<Value = TradeDirection> {
    prop_oneof![Just(TradeDirection::Buy), Just(TradeDirection::Sell)]
}

fn price_for(pair: &CurrencyPair, unit: f64) -> f64 {
    if pair.is_jpy() {
        100.0 + unit * 100.0
    } else {
        0.5 + unit
    }
}

proptest! {
    /// Any positive spread can only worsen the nominal 2:1 ratio.
    #[test]
    fn spread_never_improves_ratio(
        pair in pair(),
        direction in side(),
        unit in 0.0f64..1.0,
        stop in 5.0f64..200.0,
        spread in 0.1f64..5.0,
    ) {
        let req = PositionRequest {
            account_balance: 5_000.0,
            risk_percent: 1.0,
            stop_loss_pips: stop.round(),
            current_price: price_for(&pair, unit),
            pair,
            direction,
            spread_pips: spread,
        };
        let s = PositionSizer::new("GBP").size(&req);
        prop_assert!(s.true_risk_reward_ratio <= 2.0);
        prop_assert_eq!(s.take_profit_pips, s.stop_loss_pips * 2.0);
    }

    /// Without spread the ratio is exactly the nominal 2:1.
    #[test]
    fn zero_spread_is_exactly_two(
        pair in pair(),
        direction in side(),
        unit in 0.0f64..1.0,
        stop in 5u32..200,
    ) {
        let req = PositionRequest {
            account_balance: 5_000.0,
            risk_percent: 2.0,
            stop_loss_pips: stop as f64,
            current_price: price_for(&pair, unit),
            pair,
            direction,
            spread_pips: 0.0,
        };
        prop_assert_eq!(PositionSizer::new("GBP").size(&req).true_risk_reward_ratio, 2.0);
    }

    /// Lot sizes never risk more than the risk amount.
    #[test]
    fn lots_stay_within_risk(
        pair in pair(),
        balance in 100.0f64..100_000.0,
        risk in 0.5f64..5.0,
        stop in 5u32..200,
        unit in 0.0f64..1.0,
    ) {
        let req = PositionRequest {
            account_balance: balance,
            risk_percent: risk,
            stop_loss_pips: stop as f64,
            current_price: price_for(&pair, unit),
            pair,
            direction: TradeDirection::Buy,
            spread_pips: 1.0,
        };
        let s = PositionSizer::new("GBP").size(&req);
        prop_assert!(s.calculated_lot_size >= 0.0);
        prop_assert!(s.calculated_lot_size * s.stop_loss_pips * s.pip_value <= s.risk_amount + 1e-9);
    }

    /// The tier table never shrinks as the balance grows.
    #[test]
    fn tiers_are_monotonic(a in 0.0f64..200_000.0, b in 0.0f64..200_000.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(standard_lot_size(lo) <= standard_lot_size(hi));
    }
}

/// balance 1000, risk 2%, 20 pip stop, 1.5 pip spread, buy.
#[test]
fn small_account_buy_with_spread() {
    let req = PositionRequest {
        account_balance: 1000.0,
        risk_percent: 2.0,
        stop_loss_pips: 20.0,
        current_price: 1.08500,
        pair: CurrencyPair::new("EUR", "USD"),
        direction: TradeDirection::Buy,
        spread_pips: 1.5,
    };
    let s = PositionSizer::new("GBP").size(&req);
    assert_eq!(s.risk_amount, 20.0);
    assert_eq!(s.take_profit_pips, 40.0);
    assert_eq!(s.entry_price, 1.08515);
    assert_eq!(s.recommended_lot_size, 0.1);
    assert!(s.true_risk_reward_ratio < 2.0);
}
