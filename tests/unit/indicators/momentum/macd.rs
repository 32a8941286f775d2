//! Unit tests for MACD

use quantalk::indicators::momentum::{calculate_macd, calculate_macd_default};

#[test]
fn histogram_is_exactly_line_minus_signal() {
    let closes: Vec<f64> = (0..120)
        .map(|i| 100.0 + (i as f64 * 0.3).sin() * 5.0 + i as f64 * 0.1)
        .collect();
    let macd = calculate_macd_default(&closes).unwrap();
    assert_eq!(macd.histogram, macd.line - macd.signal);
}

#[test]
fn constant_series_yields_all_zeros() {
    let closes = vec![250.0; 60];
    let macd = calculate_macd_default(&closes).unwrap();
    assert_eq!(macd.line, 0.0);
    assert_eq!(macd.signal, 0.0);
    assert_eq!(macd.histogram, 0.0);
}

#[test]
fn uptrend_puts_the_line_above_zero() {
    let closes: Vec<f64> = (0..100).map(|i| 100.0 + i as f64).collect();
    let macd = calculate_macd_default(&closes).unwrap();
    assert!(macd.line > 0.0);
}

#[test]
fn defined_for_any_non_empty_series() {
    // Seeded EMAs make MACD defined from the very first bar
    let macd = calculate_macd(&[42.0], 12, 26, 9).unwrap();
    assert_eq!(macd.line, 0.0);
    assert_eq!(macd.histogram, 0.0);
}

#[test]
fn empty_series_is_undefined() {
    assert!(calculate_macd_default(&[]).is_none());
}
