//! Bollinger Bands indicator

use crate::indicators::trend::sma::{calculate_sma, rolling_std};

/// Latest-bar Bollinger envelope
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// Calculate Bollinger Bands at the latest bar
///
/// Middle Band = SMA(window)
/// Upper Band = Middle + (num_std * rolling sample std dev)
/// Lower Band = Middle - (num_std * rolling sample std dev)
pub fn calculate_bollinger(closes: &[f64], window: usize, num_std: f64) -> Option<BollingerBands> {
    let middle = calculate_sma(closes, window)?;
    let std = rolling_std(closes, window)?;

    Some(BollingerBands {
        upper: middle + num_std * std,
        middle,
        lower: middle - num_std * std,
    })
}

/// Calculate Bollinger Bands with the default parameters (20 SMA, 2σ)
pub fn calculate_bollinger_default(closes: &[f64]) -> Option<BollingerBands> {
    calculate_bollinger(closes, 20, 2.0)
}

/// Position of a price inside the envelope: 0 at the lower band, 1 at the
/// upper band, outside [0, 1] when price is outside the bands. A zero-width
/// envelope (constant price) yields 0.5 rather than a NaN/inf.
pub fn band_position(price: f64, bands: &BollingerBands) -> f64 {
    let width = bands.upper - bands.lower;
    if width == 0.0 {
        return 0.5;
    }
    (price - bands.lower) / width
}
