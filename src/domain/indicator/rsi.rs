//! RSI (Relative Strength Index).
//!
//! Wilder's smoothing over period-to-period gains and losses:
//! - seed: simple mean of the first `period` gains/losses
//! - then: avg = (prev_avg·(period−1) + current) / period
//!
//! RS = avg_gain / (avg_loss + ε) with ε = 1e-10. The epsilon keeps the
//! all-gain case finite instead of branching on a zero loss average; it is a
//! documented precision trade-off (RSI tops out marginally below 100), not an
//! error path. Output starts once the seed window is full: len = input − period.

use crate::domain::error::QuantkitError;
use crate::domain::indicator::check_input;

const EPSILON: f64 = 1e-10;

pub const DEFAULT_PERIOD: usize = 14;

pub fn rsi(series: &[f64], period: usize) -> Result<Vec<f64>, QuantkitError> {
    check_input(series, period, period + 1)?;

    let mut gains = Vec::with_capacity(series.len() - 1);
    let mut losses = Vec::with_capacity(series.len() - 1);
    for w in series.windows(2) {
        let delta = w[1] - w[0];
        gains.push(if delta > 0.0 { delta } else { 0.0 });
        losses.push(if delta < 0.0 { -delta } else { 0.0 });
    }

    let mut avg_gain: f64 = gains[..period].iter().sum::<f64>() / period as f64;
    let mut avg_loss: f64 = losses[..period].iter().sum::<f64>() / period as f64;

    let mut values = Vec::with_capacity(gains.len() - period + 1);
    values.push(rsi_point(avg_gain, avg_loss));

    for i in period..gains.len() {
        avg_gain = (avg_gain * (period - 1) as f64 + gains[i]) / period as f64;
        avg_loss = (avg_loss * (period - 1) as f64 + losses[i]) / period as f64;
        values.push(rsi_point(avg_gain, avg_loss));
    }

    Ok(values)
}

fn rsi_point(avg_gain: f64, avg_loss: f64) -> f64 {
    let rs = avg_gain / (avg_loss + EPSILON);
    100.0 - 100.0 / (1.0 + rs)
}
