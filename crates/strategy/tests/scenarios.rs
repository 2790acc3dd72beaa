use chrono::{Duration, TimeZone, Utc};

use common::{validate_candles, Candle, CurrencyPair, Direction, PatternDirection};
use strategy::flag::{detect_flag, find_poles};
use strategy::{analyze_timeframes, detect_both, DetectorConfig};

/// 30 hourly EUR/USD candles: flat base, five-candle rally, four-candle
/// rising flag, breakout, retest of the flag high, flat tail.
fn bull_flag() -> Vec<Candle> {
    let mut ohlc = vec![(1.1000, 1.1005, 1.0995, 1.1000); 14];
    ohlc.extend([
        // pole
        (1.1000, 1.1025, 1.0998, 1.1022),
        (1.1022, 1.1048, 1.1020, 1.1045),
        (1.1045, 1.1070, 1.1043, 1.1067),
        (1.1067, 1.1090, 1.1065, 1.1088),
        (1.1088, 1.1110, 1.1086, 1.1105),
        // flag
        (1.1098, 1.1100, 1.1080, 1.1085),
        (1.1085, 1.1104, 1.1076, 1.1088),
        (1.1088, 1.1108, 1.1084, 1.1100),
        (1.1100, 1.1112, 1.1090, 1.1111),
        // breakout, pullback
        (1.1111, 1.1130, 1.1108, 1.1126),
        (1.1126, 1.1128, 1.1110, 1.1120),
    ]);
    ohlc.extend([(1.1120, 1.1124, 1.1116, 1.1120); 5]);
    to_candles(&ohlc)
}

/// Price reflected around 1.11, turning the bull flag into a bear flag.
fn bear_flag() -> Vec<Candle> {
    let k = 2.22;
    let mirrored: Vec<_> = bull_flag()
        .iter()
        .map(|c| (k - c.open, k - c.low, k - c.high, k - c.close))
        .collect();
    to_candles(&mirrored)
}

fn to_candles(ohlc: &[(f64, f64, f64, f64)]) -> Vec<Candle> {
    let t0 = Utc.with_ymd_and_hms(2024, 5, 6, 0, 0, 0).unwrap();
    ohlc.iter()
        .enumerate()
        .map(|(i, &(o, h, l, c))| Candle::new(t0 + Duration::hours(i as i64), o, h, l, c))
        .collect()
}

fn eurusd() -> CurrencyPair {
    CurrencyPair::new("EUR", "USD")
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn fixtures_are_well_formed() {
    validate_candles(&bull_flag(), 30).unwrap();
    validate_candles(&bear_flag(), 30).unwrap();
}

#[test]
fn bull_flag_stages() {
    let cfg = DetectorConfig::default();
    let p = detect_flag(&bull_flag(), Direction::Bullish, &eurusd(), &cfg);

    let pole = p.pole.unwrap();
    assert_eq!((pole.start_index, pole.end_index), (13, 18));

    let flag = p.consolidation.as_ref().unwrap();
    assert_eq!((flag.start_index, flag.end_index), (19, 22));
    assert_eq!(flag.highest_high, 1.1112);
    assert_eq!(flag.lowest_low, 1.1076);

    let line = p.trendline.as_ref().unwrap();
    assert!(close(line.slope, 0.0004));
    assert!(close(line.intercept, 1.1100));
    assert_eq!(line.touch_count, 4);

    let breakout = p.breakout.unwrap();
    assert_eq!(breakout.index, 23);
    assert_eq!(breakout.level, 1.1112);
    assert_eq!(p.pullback.unwrap().index, 24);

    assert!(p.detected && p.valid);
    assert_eq!(p.entry, Some(1.1112));
    assert_eq!(p.stop_loss, Some(1.1076));
    assert!(close(p.take_profit.unwrap(), 1.1184));
    assert!(close(p.stop_loss_pips.unwrap(), 36.0));
    assert!(close(p.take_profit_pips.unwrap(), 72.0));
}

#[test]
fn bull_flag_has_no_bearish_reading() {
    let cfg = DetectorConfig::default();
    assert!(find_poles(&bull_flag(), Direction::Bearish, &cfg).is_empty());
    assert!(!detect_both(&bull_flag(), &eurusd(), &cfg).bearish.detected);
}

#[test]
fn confirmed_on_both_timeframes() {
    let candles = bull_flag();
    let r = analyze_timeframes(&candles, &candles, &eurusd(), &DetectorConfig::default());

    assert!(r.pattern_detected);
    assert_eq!(r.direction, PatternDirection::Buy);
    assert_eq!(r.entry, Some(1.1112));
    assert_eq!(r.stop_loss, Some(1.1076));
    assert_eq!(r.stop_loss_pips, Some(36.0));
    assert_eq!(r.take_profit_pips, Some(72.0));
    assert!(close(r.take_profit.unwrap(), 1.1184));
    assert_eq!(r.pattern_quality, 90);
    assert!(r.valid_trade);
}

#[test]
fn bear_flag_mirrors_bull_flag() {
    let p = detect_flag(&bear_flag(), Direction::Bearish, &eurusd(), &DetectorConfig::default());
    assert!(p.valid);
    assert!((p.entry.unwrap() - (2.22 - 1.1112)).abs() < 1e-9);
    assert!((p.stop_loss_pips.unwrap() - 36.0).abs() < 1e-6);
    assert!(p.take_profit.unwrap() < p.entry.unwrap());
}

#[test]
fn opposite_timeframes_do_not_confirm() {
    let r = analyze_timeframes(&bull_flag(), &bear_flag(), &eurusd(), &DetectorConfig::default());
    assert!(!r.pattern_detected);
    assert_eq!(r.direction, PatternDirection::Neutral);
    assert!(r.structural_analysis.bullish.detected);
    assert!(r.entry_analysis.bearish.detected);
    assert!(!r.valid_trade);
}

#[test]
fn short_series_is_not_detected() {
    let candles = bull_flag();
    let r = detect_both(&candles[1..], &eurusd(), &DetectorConfig::default());
    assert!(!r.bullish.detected);
    assert!(!r.bearish.detected);
}

#[test]
fn indices_point_into_the_full_series() {
    let mut candles: Vec<Candle> = (0..10)
        .map(|i| {
            let t = Utc.with_ymd_and_hms(2024, 5, 5, 14, 0, 0).unwrap() + Duration::hours(i);
            Candle::new(t, 1.1000, 1.1005, 1.0995, 1.1000)
        })
        .collect();
    candles.extend(bull_flag());

    let p = detect_flag(&candles, Direction::Bullish, &eurusd(), &DetectorConfig::default());
    assert!(p.valid);
    let pole = p.pole.unwrap();
    assert_eq!((pole.start_index, pole.end_index), (23, 28));
    let flag = p.consolidation.as_ref().unwrap();
    assert_eq!((flag.start_index, flag.end_index), (29, 32));
    assert_eq!(flag.candles[0], candles[29]);
    assert_eq!(p.breakout.unwrap().index, 33);
    assert_eq!(p.pullback.unwrap().index, 34);
    // Touches stay relative to the flag.
    assert_eq!(p.trendline.unwrap().touches, vec![0, 1, 2, 3]);
    assert_eq!(p.entry, Some(1.1112));
}
