//! Synthetic data adapter.
//!
//! Fabricates one OHLCV bar per calendar day from a seeded generator, so the
//! CLI and tests can run without any files on disk. The same seed and symbol
//! always produce the same bars. Closes land in the 50..150 band, open/high/
//! low are small perturbations around the close, volume in 1000..10000.

use crate::domain::error::QuantkitError;
use crate::domain::ohlcv::OhlcvBar;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng as _, SeedableRng};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

pub const DEFAULT_SEED: u64 = 42;

pub struct SyntheticAdapter {
    seed: u64,
    symbols: Vec<String>,
}

impl SyntheticAdapter {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            symbols: ["AAPL", "GOOGL", "MSFT"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    pub fn with_symbols(seed: u64, symbols: Vec<String>) -> Self {
        Self { seed, symbols }
    }

    // Distinct symbols get distinct streams under one adapter seed.
    fn rng_for(&self, symbol: &str) -> StdRng {
        let mut hasher = DefaultHasher::new();
        symbol.hash(&mut hasher);
        StdRng::seed_from_u64(self.seed ^ hasher.finish())
    }
}

impl DataPort for SyntheticAdapter {
    fn fetch_ohlcv(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<OhlcvBar>, QuantkitError> {
        if end_date < start_date {
            return Err(QuantkitError::Data {
                reason: format!("end date {} precedes start date {}", end_date, start_date),
            });
        }

        let mut rng = self.rng_for(symbol);
        let mut bars = Vec::new();

        for date in start_date.iter_days().take_while(|d| *d <= end_date) {
            let close = rng.gen_range(50.0..150.0);
            let open = close * (1.0 + rng.gen_range(0.0..0.01));
            let high = close * (1.0 + rng.gen_range(0.0..0.02));
            let low = close * (1.0 - rng.gen_range(0.0..0.02));
            let volume = rng.gen_range(1000..10000);

            bars.push(OhlcvBar {
                symbol: symbol.to_string(),
                date,
                open,
                high,
                low,
                close,
                volume,
            });
        }

        Ok(bars)
    }

    fn list_symbols(&self) -> Result<Vec<String>, QuantkitError> {
        Ok(self.symbols.clone())
    }
}
