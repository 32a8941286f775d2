//! Unit tests for golden/dead cross detection

use quantalk::indicators::trend::{check_golden_cross, check_golden_cross_default};

#[test]
fn insufficient_history_is_deterministically_false() {
    // Fewer than 200 bars: the long SMA is undefined, never an error
    let closes: Vec<f64> = (0..150).map(|i| 100.0 + i as f64).collect();
    assert!(!check_golden_cross_default(&closes));
}

#[test]
fn uptrend_with_full_history_is_a_golden_cross() {
    let closes: Vec<f64> = (0..250).map(|i| 100.0 + i as f64 * 0.5).collect();
    assert!(check_golden_cross_default(&closes));
}

#[test]
fn downtrend_with_full_history_is_a_dead_cross() {
    let closes: Vec<f64> = (0..250).map(|i| 500.0 - i as f64 * 0.5).collect();
    assert!(!check_golden_cross_default(&closes));
}

#[test]
fn flat_series_is_not_a_golden_cross() {
    // Equal SMAs: strictly-greater comparison stays false
    let closes = vec![100.0; 250];
    assert!(!check_golden_cross(&closes, 50, 200));
}
