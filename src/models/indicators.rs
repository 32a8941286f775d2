//! Computed indicator snapshot models

use serde::{Deserialize, Serialize};

/// Latest-bar snapshot of every indicator the engine computes.
///
/// All values are evaluated "as of now" at the most recent bar of the input
/// series. `None` means the series was too short for that indicator's
/// window; downstream consumers treat missing values as neutral.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    /// RSI(14), 0-100. `None` with fewer than 15 closes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsi: Option<f64>,
    /// MACD line (EMA12 - EMA26), in price units
    pub macd: f64,
    /// EMA9 of the MACD line
    pub macd_signal: f64,
    /// MACD line minus signal line
    pub macd_hist: f64,
    /// Position of the last close inside the Bollinger(20, 2σ) envelope.
    /// Intended range 0-1 but may exceed it when price is outside the bands.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bb_position: Option<f64>,
    /// SMA(50) above SMA(200) at the latest bar. False when either moving
    /// average is undefined.
    pub golden_cross: bool,
}
