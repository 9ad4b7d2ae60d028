//! Fundamental valuation ratios.
//!
//! Scalar ratios over point-in-time fundamentals. Each fails on a zero
//! denominator with the offending field named.

use crate::domain::error::QuantkitError;

fn ratio(numerator: f64, denominator: f64, name: &'static str) -> Result<f64, QuantkitError> {
    if denominator == 0.0 {
        return Err(QuantkitError::ZeroDenominator { name });
    }
    Ok(numerator / denominator)
}

/// Price to Earnings (P/E).
pub fn price_to_earnings(price: f64, earnings_per_share: f64) -> Result<f64, QuantkitError> {
    ratio(price, earnings_per_share, "earnings per share")
}

/// Price to Book (P/B).
pub fn price_to_book(price: f64, book_value_per_share: f64) -> Result<f64, QuantkitError> {
    ratio(price, book_value_per_share, "book value per share")
}

/// Annual dividend yield.
pub fn dividend_yield(dividend_per_share: f64, price: f64) -> Result<f64, QuantkitError> {
    ratio(dividend_per_share, price, "price")
}

/// Debt to equity.
pub fn debt_to_equity(total_debt: f64, total_equity: f64) -> Result<f64, QuantkitError> {
    ratio(total_debt, total_equity, "total equity")
}

/// Return on equity.
pub fn roe(net_income: f64, total_equity: f64) -> Result<f64, QuantkitError> {
    ratio(net_income, total_equity, "total equity")
}

/// Return on assets.
pub fn roa(net_income: f64, total_assets: f64) -> Result<f64, QuantkitError> {
    ratio(net_income, total_assets, "total assets")
}
