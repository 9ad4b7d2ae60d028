//! Simple Moving Average.
//!
//! Sliding arithmetic mean over a fixed window. Output shrinks to
//! `len - period + 1` values, one per fully-covered window position.

use crate::domain::error::QuantkitError;
use crate::domain::indicator::check_input;

pub fn sma(series: &[f64], period: usize) -> Result<Vec<f64>, QuantkitError> {
    check_input(series, period, period)?;

    // Running sum, one pass.
    let mut values = Vec::with_capacity(series.len() - period + 1);
    let mut sum: f64 = series[..period].iter().sum();
    values.push(sum / period as f64);

    for i in period..series.len() {
        sum += series[i] - series[i - period];
        values.push(sum / period as f64);
    }

    Ok(values)
}
