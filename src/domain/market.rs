//! Per-symbol market snapshot consumed by strategies and the backtest engine.

use std::collections::HashMap;

use super::ohlcv::{OhlcvBar, closes};

/// Close history plus an optional current quote for one symbol.
///
/// A missing quote is not an error: the engine substitutes a configured
/// fallback price when ordering, and portfolio valuation treats unquoted
/// positions as contributing zero.
#[derive(Debug, Clone, Default)]
pub struct SymbolData {
    pub closes: Vec<f64>,
    pub price: Option<f64>,
}

impl SymbolData {
    pub fn new(closes: Vec<f64>) -> Self {
        let price = closes.last().copied();
        SymbolData { closes, price }
    }

    pub fn from_bars(bars: &[OhlcvBar]) -> Self {
        Self::new(closes(bars))
    }
}

/// Symbol → market snapshot. Ordering within the map is not significant.
pub type MarketData = HashMap<String, SymbolData>;

/// Current quotes for every quoted symbol in the snapshot.
pub fn current_prices(data: &MarketData) -> HashMap<String, f64> {
    data.iter()
        .filter_map(|(symbol, sd)| sd.price.map(|p| (symbol.clone(), p)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn new_quotes_last_close() {
        let sd = SymbolData::new(vec![100.0, 101.0, 102.5]);
        assert_eq!(sd.price, Some(102.5));
    }

    #[test]
    fn new_empty_history_has_no_quote() {
        let sd = SymbolData::new(vec![]);
        assert_eq!(sd.price, None);
    }

    #[test]
    fn from_bars_extracts_closes() {
        let bars: Vec<OhlcvBar> = (1..=3)
            .map(|i| OhlcvBar {
                symbol: "TEST".into(),
                date: NaiveDate::from_ymd_opt(2024, 1, i).unwrap(),
                open: 100.0,
                high: 101.0,
                low: 99.0,
                close: 100.0 + i as f64,
                volume: 1000,
            })
            .collect();

        let sd = SymbolData::from_bars(&bars);
        assert_eq!(sd.closes, vec![101.0, 102.0, 103.0]);
        assert_eq!(sd.price, Some(103.0));
    }

    #[test]
    fn current_prices_skips_unquoted() {
        let mut data = MarketData::new();
        data.insert("AAA".into(), SymbolData::new(vec![10.0]));
        data.insert(
            "BBB".into(),
            SymbolData {
                closes: vec![],
                price: None,
            },
        );

        let prices = current_prices(&data);
        assert_eq!(prices.len(), 1);
        assert_eq!(prices.get("AAA"), Some(&10.0));
    }
}
