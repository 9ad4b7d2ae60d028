//! Data access port trait.

use crate::domain::error::QuantkitError;
use crate::domain::ohlcv::OhlcvBar;
use chrono::NaiveDate;

pub trait DataPort {
    /// Bars for one symbol over an inclusive date range, sorted by date.
    fn fetch_ohlcv(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<OhlcvBar>, QuantkitError>;

    fn list_symbols(&self) -> Result<Vec<String>, QuantkitError>;
}
