//! Performance metrics over return and equity series.
//!
//! Daily-frequency conventions by default (252 trading periods per year).
//! The empty-input cases return 0.0 rather than erroring so a summary over a
//! run that produced no snapshots still prints.

use crate::domain::error::QuantkitError;

pub const PERIODS_PER_YEAR: usize = 252;

const DRAWDOWN_EPSILON: f64 = 1e-10;

/// Percentage change over `period` steps: out[i] = (p[i+period] − p[i]) / p[i].
/// Output length is input − period.
pub fn simple_returns(prices: &[f64], period: usize) -> Result<Vec<f64>, QuantkitError> {
    if period == 0 {
        return Err(QuantkitError::InvalidPeriod { period });
    }
    if prices.len() < period + 1 {
        return Err(QuantkitError::InsufficientData {
            required: period + 1,
            actual: prices.len(),
        });
    }

    Ok(prices
        .windows(period + 1)
        .map(|w| (w[period] - w[0]) / w[0])
        .collect())
}

/// Compound a periodic return up to a yearly figure.
pub fn annualize_return(periodic_return: f64, periods_per_year: usize) -> f64 {
    (1.0 + periodic_return).powi(periods_per_year as i32) - 1.0
}

/// Annualized Sharpe ratio of a periodic return series.
///
/// The risk-free rate is annual and converted to its periodic equivalent
/// before excess returns are taken. Zero on an empty series and on a flat
/// one (zero dispersion means the ratio is undefined, not infinite).
pub fn sharpe_ratio(returns: &[f64], risk_free_rate: f64, periods_per_year: usize) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }

    let periodic_rf = (1.0 + risk_free_rate).powf(1.0 / periods_per_year as f64) - 1.0;
    let excess: Vec<f64> = returns.iter().map(|r| r - periodic_rf).collect();

    let mean = excess.iter().sum::<f64>() / excess.len() as f64;
    // Population standard deviation.
    let variance = excess.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / excess.len() as f64;
    let std = variance.sqrt();

    if std == 0.0 {
        return 0.0;
    }
    mean / std * (periods_per_year as f64).sqrt()
}

/// Largest peak-to-trough decline of an equity series, as a non-positive
/// fraction of the running peak. The epsilon keeps a zero peak finite.
pub fn max_drawdown(equity: &[f64]) -> f64 {
    if equity.is_empty() {
        return 0.0;
    }

    let mut running_max = f64::NEG_INFINITY;
    let mut worst = 0.0_f64;
    for &value in equity {
        running_max = running_max.max(value);
        let drawdown = (value - running_max) / (running_max + DRAWDOWN_EPSILON);
        worst = worst.min(drawdown);
    }
    worst
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn simple_returns_one_period() {
        let returns = simple_returns(&[100.0, 110.0, 99.0], 1).unwrap();
        assert_eq!(returns.len(), 2);
        assert_relative_eq!(returns[0], 0.1);
        assert_relative_eq!(returns[1], -0.1);
    }

    #[test]
    fn simple_returns_multi_period() {
        let returns = simple_returns(&[100.0, 105.0, 110.0, 121.0], 2).unwrap();
        assert_eq!(returns.len(), 2);
        assert_relative_eq!(returns[0], 0.1);
        assert_relative_eq!(returns[1], 121.0 / 105.0 - 1.0);
    }

    #[test]
    fn simple_returns_too_short() {
        assert!(matches!(
            simple_returns(&[100.0], 1),
            Err(QuantkitError::InsufficientData {
                required: 2,
                actual: 1,
            })
        ));
    }

    #[test]
    fn simple_returns_zero_period() {
        assert!(matches!(
            simple_returns(&[100.0, 101.0], 0),
            Err(QuantkitError::InvalidPeriod { period: 0 })
        ));
    }

    #[test]
    fn annualize_daily_return() {
        // 0.1% per day over 252 days.
        let annual = annualize_return(0.001, PERIODS_PER_YEAR);
        assert_relative_eq!(annual, 1.001_f64.powi(252) - 1.0);
    }

    #[test]
    fn annualize_zero_is_zero() {
        assert_relative_eq!(annualize_return(0.0, PERIODS_PER_YEAR), 0.0);
    }

    #[test]
    fn sharpe_empty_is_zero() {
        assert_relative_eq!(sharpe_ratio(&[], 0.02, PERIODS_PER_YEAR), 0.0);
    }

    #[test]
    fn sharpe_flat_returns_is_zero() {
        assert_relative_eq!(sharpe_ratio(&[0.01; 10], 0.0, PERIODS_PER_YEAR), 0.0);
    }

    #[test]
    fn sharpe_positive_for_steadily_positive_excess() {
        let returns = [0.01, 0.02, 0.01, 0.015, 0.02];
        assert!(sharpe_ratio(&returns, 0.0, PERIODS_PER_YEAR) > 0.0);
    }

    #[test]
    fn sharpe_known_value_zero_rf() {
        // mean 0.01, population std 0.01, sqrt(252) scaling.
        let returns = [0.0, 0.02];
        let expected = (0.01 / 0.01) * (252.0_f64).sqrt();
        assert_relative_eq!(
            sharpe_ratio(&returns, 0.0, PERIODS_PER_YEAR),
            expected,
            epsilon = 1e-9
        );
    }

    #[test]
    fn sharpe_risk_free_lowers_ratio() {
        let returns = [0.01, 0.02, 0.01, 0.015, 0.02];
        let without = sharpe_ratio(&returns, 0.0, PERIODS_PER_YEAR);
        let with = sharpe_ratio(&returns, 0.05, PERIODS_PER_YEAR);
        assert!(with < without);
    }

    #[test]
    fn max_drawdown_empty_is_zero() {
        assert_relative_eq!(max_drawdown(&[]), 0.0);
    }

    #[test]
    fn max_drawdown_monotonic_rise_is_zero() {
        assert_relative_eq!(max_drawdown(&[100.0, 110.0, 120.0]), 0.0);
    }

    #[test]
    fn max_drawdown_known_value() {
        // Peak 120, trough 90: drawdown = -0.25.
        let equity = [100.0, 120.0, 90.0, 110.0];
        assert_relative_eq!(max_drawdown(&equity), -0.25, epsilon = 1e-9);
    }

    #[test]
    fn max_drawdown_takes_the_deepest() {
        let equity = [100.0, 90.0, 110.0, 77.0];
        assert_relative_eq!(max_drawdown(&equity), -0.3, epsilon = 1e-9);
    }
}
