//! Technical indicator implementations.
//!
//! All indicators are pure functions over an ordered close series (oldest
//! first). They fail fast with [`QuantkitError::InsufficientData`] or
//! [`QuantkitError::InvalidPeriod`] rather than padding or truncating short
//! input.
//!
//! [`QuantkitError::InsufficientData`]: crate::domain::error::QuantkitError::InsufficientData
//! [`QuantkitError::InvalidPeriod`]: crate::domain::error::QuantkitError::InvalidPeriod

pub mod sma;
pub mod ema;
pub mod macd;
pub mod rsi;

pub use ema::ema;
pub use macd::{macd, macd_default, macd_sensitive, MacdOutput};
pub use rsi::rsi;
pub use sma::sma;

use crate::domain::error::QuantkitError;

/// Shared precondition check: period ≥ 1 and at least `min_len` data points.
pub(crate) fn check_input(
    series: &[f64],
    period: usize,
    min_len: usize,
) -> Result<(), QuantkitError> {
    if period == 0 {
        return Err(QuantkitError::InvalidPeriod { period });
    }
    if series.len() < min_len {
        return Err(QuantkitError::InsufficientData {
            required: min_len,
            actual: series.len(),
        });
    }
    Ok(())
}
