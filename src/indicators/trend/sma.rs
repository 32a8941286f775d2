//! SMA (Simple Moving Average) indicator

/// Calculate the SMA of the trailing `window` values.
///
/// Strict rolling window: returns `None` when fewer than `window` values are
/// available, never a partial-window mean.
pub fn calculate_sma(values: &[f64], window: usize) -> Option<f64> {
    if window == 0 || values.len() < window {
        return None;
    }

    let tail = &values[values.len() - window..];
    Some(tail.iter().sum::<f64>() / window as f64)
}

/// Sample standard deviation (divisor n-1) of the trailing `window` values.
pub fn rolling_std(values: &[f64], window: usize) -> Option<f64> {
    if window < 2 || values.len() < window {
        return None;
    }

    let tail = &values[values.len() - window..];
    let mean = tail.iter().sum::<f64>() / window as f64;
    let variance = tail.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (window as f64 - 1.0);
    Some(variance.sqrt())
}
