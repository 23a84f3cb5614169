//! Exponential moving average routine
//!
//! Smoothing factor `k = 2 / (window + 1)`, seeded with the first value.
//! The output has one value per input value; callers decide how many
//! leading warm-up values to discard.

/// EMA over a value sequence
///
/// Returns an empty vector for an empty input or a zero window.
pub fn ema(window: usize, values: &[f64]) -> Vec<f64> {
    if window == 0 || values.is_empty() {
        return Vec::new();
    }

    let k = 2.0 / (window as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut prev = values[0];
    out.push(prev);

    for &value in &values[1..] {
        prev = value * k + prev * (1.0 - k);
        out.push(prev);
    }

    out
}
