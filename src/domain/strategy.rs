//! Signal-generating strategies.
//!
//! A strategy maps a market snapshot to per-symbol [`Signal`]s. Symbols that
//! trigger nothing are absent from the result; callers treat absence as hold.
//! Symbols with too little history for the strategy's lookback are skipped
//! rather than erroring, so one thin series never blocks the rest of the
//! universe.

use std::collections::HashMap;

use super::indicator::rsi;
use super::market::MarketData;

/// A triggered trade action. Absence from a signal map means hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Buy,
    Sell,
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Signal::Buy => write!(f, "BUY"),
            Signal::Sell => write!(f, "SELL"),
        }
    }
}

pub type SignalMap = HashMap<String, Signal>;

pub trait Strategy {
    fn name(&self) -> &str;

    fn generate_signals(&self, data: &MarketData) -> SignalMap;
}

/// Buy when the fast rolling mean crosses above the slow one, sell on the
/// reverse cross.
#[derive(Debug, Clone)]
pub struct MaCrossoverStrategy {
    pub fast_period: usize,
    pub slow_period: usize,
}

impl Default for MaCrossoverStrategy {
    fn default() -> Self {
        MaCrossoverStrategy {
            fast_period: 10,
            slow_period: 20,
        }
    }
}

impl MaCrossoverStrategy {
    pub fn new(fast_period: usize, slow_period: usize) -> Self {
        MaCrossoverStrategy {
            fast_period,
            slow_period,
        }
    }
}

impl Strategy for MaCrossoverStrategy {
    fn name(&self) -> &str {
        "MovingAverageCrossover"
    }

    fn generate_signals(&self, data: &MarketData) -> SignalMap {
        let mut signals = SignalMap::new();

        for (symbol, sd) in data {
            // A crossover needs the current and previous rolling means of the
            // slow window, i.e. slow_period + 1 closes.
            let Some((prev_fast, curr_fast)) = last_two_window_means(&sd.closes, self.fast_period)
            else {
                continue;
            };
            let Some((prev_slow, curr_slow)) = last_two_window_means(&sd.closes, self.slow_period)
            else {
                continue;
            };

            if prev_fast <= prev_slow && curr_fast > curr_slow {
                signals.insert(symbol.clone(), Signal::Buy);
            } else if prev_fast >= prev_slow && curr_fast < curr_slow {
                signals.insert(symbol.clone(), Signal::Sell);
            }
        }

        signals
    }
}

/// Buy when RSI drops below the oversold threshold, sell when it rises above
/// the overbought threshold. Thresholds trigger on the cross, not the level.
#[derive(Debug, Clone)]
pub struct RsiThresholdStrategy {
    pub period: usize,
    pub oversold: f64,
    pub overbought: f64,
}

impl Default for RsiThresholdStrategy {
    fn default() -> Self {
        RsiThresholdStrategy {
            period: 14,
            oversold: 30.0,
            overbought: 70.0,
        }
    }
}

impl RsiThresholdStrategy {
    pub fn new(period: usize, oversold: f64, overbought: f64) -> Self {
        RsiThresholdStrategy {
            period,
            oversold,
            overbought,
        }
    }
}

impl Strategy for RsiThresholdStrategy {
    fn name(&self) -> &str {
        "RsiThreshold"
    }

    fn generate_signals(&self, data: &MarketData) -> SignalMap {
        let mut signals = SignalMap::new();

        for (symbol, sd) in data {
            let Ok(values) = rsi(&sd.closes, self.period) else {
                continue;
            };
            if values.len() < 2 {
                continue;
            }

            let prev = values[values.len() - 2];
            let curr = values[values.len() - 1];

            if prev >= self.oversold && curr < self.oversold {
                signals.insert(symbol.clone(), Signal::Buy);
            } else if prev <= self.overbought && curr > self.overbought {
                signals.insert(symbol.clone(), Signal::Sell);
            }
        }

        signals
    }
}

/// Demonstration strategy: buy everything on even periods, sell on odd.
pub fn alternating_signals(data: &MarketData, period_index: usize) -> SignalMap {
    let signal = if period_index % 2 == 0 {
        Signal::Buy
    } else {
        Signal::Sell
    };
    data.keys().map(|s| (s.clone(), signal)).collect()
}

/// Rolling means of the last two window positions, or `None` when the series
/// is too short to hold both.
fn last_two_window_means(closes: &[f64], period: usize) -> Option<(f64, f64)> {
    if period == 0 || closes.len() < period + 1 {
        return None;
    }
    let n = closes.len();
    let prev = closes[n - 1 - period..n - 1].iter().sum::<f64>() / period as f64;
    let curr = closes[n - period..].iter().sum::<f64>() / period as f64;
    Some((prev, curr))
}
