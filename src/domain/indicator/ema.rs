//! Exponential Moving Average.
//!
//! α = 2/(period+1); out[0] = series[0], out[i] = α·series[i] + (1-α)·out[i-1].
//! Output covers the full input length. The raw-price seed (rather than a
//! period-average seed) is a deliberate simplification; downstream consumers
//! depend on it.

use crate::domain::error::QuantkitError;
use crate::domain::indicator::check_input;

pub fn ema(series: &[f64], period: usize) -> Result<Vec<f64>, QuantkitError> {
    check_input(series, period, period)?;

    let alpha = 2.0 / (period as f64 + 1.0);
    let mut values = Vec::with_capacity(series.len());
    values.push(series[0]);

    for &price in &series[1..] {
        let prev = *values.last().unwrap();
        values.push(alpha * price + (1.0 - alpha) * prev);
    }

    Ok(values)
}
