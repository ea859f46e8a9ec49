use chrono::{TimeZone, Utc};
use nepse_sentiment::credibility::{ImpactParams, evaluate};
use nepse_sentiment::{Candle, Direction, SentimentRecord};

use crate::common::{DAY_MS, utc_ms};

fn record(date: &str, score: f64) -> SentimentRecord {
    SentimentRecord {
        article_id: "A1".into(),
        matched_company: "Nabil Bank Limited".into(),
        published_date: date.into(),
        media_url: "https://example.com/a1".into(),
        sentiment_score: score,
    }
}

fn daily(start_ms: i64, closes: &[f64]) -> Vec<Candle> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| Candle {
            time_ms: start_ms + i as i64 * DAY_MS,
            open: c,
            high: None,
            low: None,
            close: c,
            volume: None,
        })
        .collect()
}

#[test]
fn two_candle_move_after_publish_day() {
    let candles = daily(utc_ms(2025, 7, 1), &[100.0, 101.0, 102.0, 90.0]);
    let r = evaluate(&record("2025-07-01 10:00:00", 0.4), "NABIL", &candles, &ImpactParams::default()).unwrap();
    assert!((r.price_change_pct - 2.0).abs() < 1e-9);
    assert_eq!(r.predicted_dir, Direction::Positive);
    assert_eq!(r.actual_dir, Direction::Positive);
    assert_eq!(r.symbol, "NABIL");
    assert_eq!(r.media_weight, 0.0);
}

#[test]
fn small_moves_fall_in_the_deadband() {
    let candles = daily(utc_ms(2025, 7, 1), &[100.0, 100.0, 100.05]);
    let r = evaluate(&record("2025-07-01", -0.3), "NABIL", &candles, &ImpactParams::default()).unwrap();
    assert_eq!(r.predicted_dir, Direction::Negative);
    assert_eq!(r.actual_dir, Direction::Neutral);
}

#[test]
fn anchor_is_first_candle_within_tolerance() {
    // Publish on the 4th; the bar of the 2nd is already within three days.
    let candles = daily(utc_ms(2025, 7, 2), &[100.0, 200.0, 110.0, 300.0]);
    let r = evaluate(&record("2025-07-04T06:00:00Z", 0.1), "X", &candles, &ImpactParams::default()).unwrap();
    assert!((r.price_change_pct - 10.0).abs() < 1e-9);
}

#[test]
fn no_result_without_nearby_candle_or_lookahead() {
    let params = ImpactParams::default();
    let far = daily(utc_ms(2025, 7, 10), &[1.0, 2.0, 3.0]);
    assert!(evaluate(&record("2025-07-01", 0.5), "X", &far, &params).is_none());

    let short = daily(utc_ms(2025, 7, 1), &[1.0, 2.0]);
    assert!(evaluate(&record("2025-07-01", 0.5), "X", &short, &params).is_none());

    let ok = daily(utc_ms(2025, 7, 1), &[1.0, 2.0, 3.0]);
    assert!(evaluate(&record("not a date", 0.5), "X", &ok, &params).is_none());
}

#[test]
fn tolerance_and_lookahead_are_configurable() {
    let params = ImpactParams {
        lookahead: 1,
        tolerance: chrono::TimeDelta::hours(12),
        deadband_pct: 1.0,
    };
    let start = Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap().timestamp_millis();
    let candles = daily(start, &[100.0, 100.5, 120.0]);
    let r = evaluate(&record("2025-07-01T03:00:00Z", 0.2), "X", &candles, &params).unwrap();
    assert_eq!(r.actual_dir, Direction::Neutral);
    assert!((r.price_change_pct - 0.5).abs() < 1e-9);
}
