//! MACD (Moving Average Convergence Divergence).
//!
//! MACD line = EMA(fast) − EMA(slow), signal line = EMA(macd_line, signal),
//! histogram = macd_line − signal_line. The slow EMA is computed over the
//! suffix of the input aligned to the fast EMA's length, and every series is
//! right-aligned to the shortest before subtraction. With the full-length EMA
//! those alignments are identities, but the steps are kept because consumers
//! depend on the output alignment.
//!
//! Standard defaults 12/26/9; the "sensitive" variant is the same computation
//! with 8/17/9.

use crate::domain::error::QuantkitError;
use crate::domain::indicator::ema;

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

pub const SENSITIVE_FAST: usize = 8;
pub const SENSITIVE_SLOW: usize = 17;

/// The three MACD series, length-aligned to the signal line.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdOutput {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

pub fn macd(
    series: &[f64],
    fast: usize,
    slow: usize,
    signal_period: usize,
) -> Result<MacdOutput, QuantkitError> {
    let fast_ema = ema(series, fast)?;

    // Slow EMA over the suffix aligned to the fast EMA's length.
    let slow_input = &series[series.len() - fast_ema.len()..];
    let slow_ema = ema(slow_input, slow)?;

    // MACD line over the tail shared by both EMAs.
    let offset = fast_ema.len() - slow_ema.len();
    let macd_line: Vec<f64> = fast_ema[offset..]
        .iter()
        .zip(&slow_ema)
        .map(|(f, s)| f - s)
        .collect();

    let signal_line = ema(&macd_line, signal_period)?;

    // Right-align the MACD line to the signal line before differencing.
    let offset = macd_line.len() - signal_line.len();
    let histogram: Vec<f64> = macd_line[offset..]
        .iter()
        .zip(&signal_line)
        .map(|(m, s)| m - s)
        .collect();

    Ok(MacdOutput {
        macd: macd_line[offset..].to_vec(),
        signal: signal_line,
        histogram,
    })
}

/// MACD with shorter fast/slow periods, more responsive to price changes.
pub fn macd_sensitive(series: &[f64]) -> Result<MacdOutput, QuantkitError> {
    macd(series, SENSITIVE_FAST, SENSITIVE_SLOW, DEFAULT_SIGNAL)
}

/// MACD with the standard 12/26/9 parameters.
pub fn macd_default(series: &[f64]) -> Result<MacdOutput, QuantkitError> {
    macd(series, DEFAULT_FAST, DEFAULT_SLOW, DEFAULT_SIGNAL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn trend(n: usize) -> Vec<f64> {
        (0..n).map(|i| 100.0 + i as f64).collect()
    }

    #[test]
    fn macd_outputs_equal_lengths() {
        let out = macd_default(&trend(60)).unwrap();
        assert_eq!(out.macd.len(), out.signal.len());
        assert_eq!(out.macd.len(), out.histogram.len());
    }

    #[test]
    fn macd_histogram_is_line_minus_signal() {
        let out = macd_default(&trend(60)).unwrap();
        for i in 0..out.macd.len() {
            assert_relative_eq!(
                out.histogram[i],
                out.macd[i] - out.signal[i],
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn macd_line_matches_ema_difference() {
        let series = trend(40);
        let out = macd(&series, 3, 5, 2).unwrap();
        let fast_ema = ema(&series, 3).unwrap();
        let slow_ema = ema(&series, 5).unwrap();

        for (i, v) in out.macd.iter().enumerate() {
            assert_relative_eq!(*v, fast_ema[i] - slow_ema[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn macd_flat_series_is_zero() {
        let out = macd_default(&[100.0; 50]).unwrap();
        for i in 0..out.macd.len() {
            assert_relative_eq!(out.macd[i], 0.0);
            assert_relative_eq!(out.signal[i], 0.0);
            assert_relative_eq!(out.histogram[i], 0.0);
        }
    }

    #[test]
    fn macd_sensitive_differs_from_standard() {
        // A curved series: shorter periods react differently than 12/26.
        let series: Vec<f64> = (0..60).map(|i| 100.0 + (i as f64 * 0.3).sin() * 10.0).collect();
        let standard = macd_default(&series).unwrap();
        let sensitive = macd_sensitive(&series).unwrap();

        let differs = standard
            .macd
            .iter()
            .zip(&sensitive.macd)
            .any(|(a, b)| (a - b).abs() > 1e-9);
        assert!(differs);
    }

    #[test]
    fn macd_insufficient_data_for_slow() {
        // Enough for fast EMA, not for slow.
        let result = macd(&trend(20), 12, 26, 9);
        assert!(matches!(
            result,
            Err(QuantkitError::InsufficientData { .. })
        ));
    }

    #[test]
    fn macd_zero_period() {
        let result = macd(&trend(40), 0, 26, 9);
        assert!(matches!(result, Err(QuantkitError::InvalidPeriod { .. })));
        let result = macd(&trend(40), 12, 26, 0);
        assert!(matches!(result, Err(QuantkitError::InvalidPeriod { .. })));
    }

    #[test]
    fn macd_default_constants() {
        assert_eq!(DEFAULT_FAST, 12);
        assert_eq!(DEFAULT_SLOW, 26);
        assert_eq!(DEFAULT_SIGNAL, 9);
        assert_eq!(SENSITIVE_FAST, 8);
        assert_eq!(SENSITIVE_SLOW, 17);
    }
}
