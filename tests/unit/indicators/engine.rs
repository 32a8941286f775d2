//! Unit tests for the indicator engine

use chrono::{Duration, TimeZone, Utc};
use quantalk::indicators::{compute_indicators, IndicatorError};
use quantalk::models::{PriceBar, PriceSeries};

fn series_from_closes(closes: &[f64]) -> PriceSeries {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            PriceBar::new(
                start + Duration::days(i as i64),
                close,
                close + 1.0,
                close - 1.0,
                close,
                1_000,
            )
        })
        .collect();
    PriceSeries::new(bars)
}

#[test]
fn empty_series_is_an_error() {
    let result = compute_indicators(&PriceSeries::default());
    assert_eq!(result.unwrap_err(), IndicatorError::InsufficientData);
}

#[test]
fn rising_thirty_bar_series_produces_the_full_snapshot() {
    let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
    let set = compute_indicators(&series_from_closes(&closes)).unwrap();

    // All gains, zero losses
    assert_eq!(set.rsi, Some(100.0));
    // 30 bars is enough for the 20-bar envelope but not for SMA(200)
    assert!(set.bb_position.is_some());
    assert!(!set.golden_cross);
    assert_eq!(set.macd_hist, set.macd - set.macd_signal);
}

#[test]
fn short_series_reports_undefined_windows_not_errors() {
    let closes = [100.0, 101.0, 102.0, 101.5, 103.0];
    let set = compute_indicators(&series_from_closes(&closes)).unwrap();

    assert_eq!(set.rsi, None);
    assert_eq!(set.bb_position, None);
    assert!(!set.golden_cross);
    // MACD is still defined thanks to the seeded EMAs
    assert_eq!(set.macd_hist, set.macd - set.macd_signal);
}

#[test]
fn long_uptrend_flags_a_golden_cross() {
    let closes: Vec<f64> = (0..250).map(|i| 100.0 + i as f64 * 0.5).collect();
    let set = compute_indicators(&series_from_closes(&closes)).unwrap();
    assert!(set.golden_cross);
}

#[test]
fn constant_series_keeps_the_band_position_finite() {
    let closes = vec![100.0; 60];
    let set = compute_indicators(&series_from_closes(&closes)).unwrap();
    assert_eq!(set.bb_position, Some(0.5));
}
