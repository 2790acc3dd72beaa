use chrono::{DateTime, Timelike, Utc};

use common::CurrencyPair;

const BROKER_UTC_OFFSET_HOURS: u32 = 3;

/// Typical spread in pips outside any session adjustment.
pub fn base_spread(pair: &CurrencyPair) -> f64 {
    match (pair.base.as_str(), pair.quote.as_str()) {
        ("EUR", "USD") => 1.0,
        ("USD", "JPY") => 1.2,
        ("GBP", "USD") => 1.8,
        ("AUD", "USD") => 1.5,
        ("NZD", "USD") => 1.9,
        ("EUR", "GBP") => 1.7,
        ("USD", "CHF") => 1.6,
        ("EUR", "JPY") => 2.0,
        ("USD", "CAD") => 1.8,
        ("GBP", "JPY") => 2.5,
        _ => 2.0,
    }
}

/// Spread multiplier for the hour in broker time (GMT+3).
pub fn session_multiplier(broker_hour: u32) -> f64 {
    match broker_hour {
        22..=23 | 0..=6 => 1.5,
        19..=21 => 1.3,
        13..=15 => 0.8,
        _ => 1.0,
    }
}

/// Expected spread in pips at `at`, rounded to 0.1 pip.
pub fn estimate_spread(pair: &CurrencyPair, at: DateTime<Utc>) -> f64 {
    let broker_hour = (at.hour() + BROKER_UTC_OFFSET_HOURS) % 24;
    (base_spread(pair) * session_multiplier(broker_hour) * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at_utc(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 3, hour, 30, 0).unwrap()
    }

    #[test]
    fn london_new_york_overlap_is_tighter() {
        // 11:30 UTC is 14:30 broker time
        let eurusd = CurrencyPair::new("EUR", "USD");
        assert_eq!(estimate_spread(&eurusd, at_utc(11)), 0.8);
    }

    #[test]
    fn asian_session_widens() {
        // 20:30 UTC is 23:30 broker time
        let gbpjpy = CurrencyPair::new("GBP", "JPY");
        assert_eq!(estimate_spread(&gbpjpy, at_utc(20)), 3.8);
    }

    #[test]
    fn evening_and_default_pairs() {
        // 17:30 UTC is 20:30 broker time
        let exotic = CurrencyPair::new("USD", "TRY");
        assert_eq!(estimate_spread(&exotic, at_utc(17)), 2.6);
        // 07:30 UTC is 10:30 broker time
        assert_eq!(estimate_spread(&exotic, at_utc(7)), 2.0);
    }

    #[test]
    fn multiplier_boundaries() {
        assert_eq!(session_multiplier(7), 1.0);
        assert_eq!(session_multiplier(6), 1.5);
        assert_eq!(session_multiplier(22), 1.5);
        assert_eq!(session_multiplier(16), 1.0);
    }
}
