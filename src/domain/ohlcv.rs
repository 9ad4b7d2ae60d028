//! OHLCV bar representation.

use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct OhlcvBar {
    pub symbol: String,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

/// Extract the close series from a bar sequence, oldest first.
pub fn closes(bars: &[OhlcvBar]) -> Vec<f64> {
    bars.iter().map(|b| b.close).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_bar(day: u32, close: f64) -> OhlcvBar {
        OhlcvBar {
            symbol: "TEST".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 1000,
        }
    }

    #[test]
    fn closes_preserves_order() {
        let bars = vec![make_bar(1, 100.0), make_bar(2, 101.5), make_bar(3, 99.0)];
        assert_eq!(closes(&bars), vec![100.0, 101.5, 99.0]);
    }

    #[test]
    fn closes_empty() {
        assert!(closes(&[]).is_empty());
    }
}
