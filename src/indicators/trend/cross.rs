//! Golden/dead cross detection on SMA(50) vs SMA(200)

use super::sma::calculate_sma;

pub const FAST_WINDOW: usize = 50;
pub const SLOW_WINDOW: usize = 200;

/// Check for a golden-cross state at the latest bar.
///
/// True when SMA(fast) > SMA(slow). When either moving average is undefined
/// (insufficient history), the state is deterministically false.
pub fn check_golden_cross(closes: &[f64], fast: usize, slow: usize) -> bool {
    match (calculate_sma(closes, fast), calculate_sma(closes, slow)) {
        (Some(fast_sma), Some(slow_sma)) => fast_sma > slow_sma,
        _ => false,
    }
}

/// Golden-cross state with the default 50/200 windows
pub fn check_golden_cross_default(closes: &[f64]) -> bool {
    check_golden_cross(closes, FAST_WINDOW, SLOW_WINDOW)
}
