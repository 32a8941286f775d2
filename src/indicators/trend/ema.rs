//! EMA (Exponential Moving Average) indicator

/// Calculate the full EMA series for a span.
///
/// Recurrence: seeds at the first observation, then
/// `ema_t = alpha * x_t + (1 - alpha) * ema_{t-1}` with
/// `alpha = 2 / (span + 1)`. No bias-correction reweighting of early terms
/// (the "adjust=False" convention).
pub fn ema_series(values: &[f64], span: usize) -> Vec<f64> {
    if values.is_empty() || span == 0 {
        return Vec::new();
    }

    let alpha = 2.0 / (span as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut prev = values[0];
    out.push(prev);
    for &x in &values[1..] {
        prev = alpha * x + (1.0 - alpha) * prev;
        out.push(prev);
    }
    out
}

/// Latest EMA value for a span
pub fn calculate_ema(values: &[f64], span: usize) -> Option<f64> {
    ema_series(values, span).last().copied()
}
