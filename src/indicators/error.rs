//! Indicator engine errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IndicatorError {
    /// The input series has no closes to compute from. Callers are expected
    /// to degrade gracefully (show "indicators unavailable") rather than
    /// treat this as fatal.
    #[error("insufficient data: price series is empty")]
    InsufficientData,
}
