//! MACD (Moving Average Convergence Divergence) indicator

use crate::indicators::trend::ema::ema_series;

/// Latest-bar MACD values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Macd {
    pub line: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// Calculate MACD at the latest bar
///
/// MACD = EMA(fast) - EMA(slow)
/// Signal = EMA(signal_period) of the MACD series
/// Histogram = MACD - Signal
///
/// Every EMA seeds at its first observation, so the result is defined for
/// any non-empty series; early values are simply dominated by the seed.
pub fn calculate_macd(
    closes: &[f64],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> Option<Macd> {
    if closes.is_empty() {
        return None;
    }

    let fast = ema_series(closes, fast_period);
    let slow = ema_series(closes, slow_period);
    let macd_values: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
    let signal_values = ema_series(&macd_values, signal_period);

    let line = *macd_values.last()?;
    let signal = *signal_values.last()?;

    Some(Macd {
        line,
        signal,
        histogram: line - signal,
    })
}

/// Calculate MACD with the default periods (12, 26, 9)
pub fn calculate_macd_default(closes: &[f64]) -> Option<Macd> {
    calculate_macd(closes, 12, 26, 9)
}
