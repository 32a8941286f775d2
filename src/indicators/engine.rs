//! Indicator computation engine
//!
//! Pure, deterministic, no I/O. Turns a raw price series into the full
//! latest-bar indicator snapshot. Either returns a complete record or fails
//! entirely; it never partially populates the set.

use crate::indicators::error::IndicatorError;
use crate::indicators::momentum::{calculate_macd_default, calculate_rsi_default};
use crate::indicators::trend::check_golden_cross_default;
use crate::indicators::volatility::{band_position, calculate_bollinger_default};
use crate::models::{IndicatorSet, PriceSeries};

/// Compute every indicator at the most recent bar of the series.
///
/// The caller guarantees time-ascending order with unique timestamps; the
/// engine does not validate this. Indicators whose window exceeds the series
/// length come back as `None` (a documented partial result, not an error).
pub fn compute_indicators(series: &PriceSeries) -> Result<IndicatorSet, IndicatorError> {
    let closes = series.closes();
    let last_close = closes.last().copied().ok_or(IndicatorError::InsufficientData)?;

    let rsi = calculate_rsi_default(&closes);

    // Non-empty series, so MACD is always defined
    let macd = calculate_macd_default(&closes).ok_or(IndicatorError::InsufficientData)?;

    let bb_position =
        calculate_bollinger_default(&closes).map(|bands| band_position(last_close, &bands));

    let golden_cross = check_golden_cross_default(&closes);

    Ok(IndicatorSet {
        rsi,
        macd: macd.line,
        macd_signal: macd.signal,
        macd_hist: macd.histogram,
        bb_position,
        golden_cross,
    })
}
