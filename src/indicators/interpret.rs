//! One-line interpretations of indicator values
//!
//! Fixed-threshold categorical labels for display next to each indicator.
//! The string entry point never fails; unknown indicator names collapse to
//! a safe default at this boundary instead of deep in formatting code.

use std::str::FromStr;

/// The closed set of indicators that have an interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorKind {
    Rsi,
    MacdHist,
    BbPosition,
    GoldenCross,
}

impl FromStr for IndicatorKind {
    type Err = ();

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "RSI" => Ok(IndicatorKind::Rsi),
            "MACD_hist" => Ok(IndicatorKind::MacdHist),
            "BB_Position" => Ok(IndicatorKind::BbPosition),
            "GoldenCross" => Ok(IndicatorKind::GoldenCross),
            _ => Err(()),
        }
    }
}

/// Label shown when an indicator name is not recognized
pub const DEFAULT_INTERPRETATION: &str = "analyzing";

/// Interpret a known indicator's latest value.
///
/// Boolean indicators are passed as 0.0 / 1.0.
pub fn interpret_kind(kind: IndicatorKind, value: f64) -> &'static str {
    match kind {
        IndicatorKind::Rsi => {
            if value < 30.0 {
                "oversold"
            } else if value > 70.0 {
                "overbought"
            } else {
                "neutral"
            }
        }
        IndicatorKind::MacdHist => {
            if value > 0.0 {
                "buy signal"
            } else {
                "sell signal"
            }
        }
        IndicatorKind::BbPosition => {
            if value < 0.2 {
                "near lower band (cheap)"
            } else if value > 0.8 {
                "near upper band (expensive)"
            } else {
                "middle"
            }
        }
        IndicatorKind::GoldenCross => {
            if value != 0.0 {
                "golden cross occurred"
            } else {
                "dead-cross state"
            }
        }
    }
}

/// Interpret an indicator by name. Unknown names yield the default label,
/// never an error.
pub fn interpret(name: &str, value: f64) -> &'static str {
    match name.parse::<IndicatorKind>() {
        Ok(kind) => interpret_kind(kind, value),
        Err(()) => DEFAULT_INTERPRETATION,
    }
}
