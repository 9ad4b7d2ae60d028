//! Backtest engine: capital, positions, trade log, equity curve.
//!
//! The engine is a plain state machine mutated through [`BacktestEngine::buy`],
//! [`BacktestEngine::sell`] and [`BacktestEngine::record_equity`]. A run drives
//! a fixed number of periods and never aborts on an individual order: a
//! rejected order is skipped so one symbol's insufficient funds never blocks
//! the others in the same period. Direct callers of buy/sell outside a run
//! see the rejection as an error.
//!
//! Engines are scoped to one run. A host serving concurrent requests must
//! construct a fresh engine per request rather than share one.

use chrono::{Duration, NaiveDate};
use std::collections::HashMap;

use super::error::QuantkitError;
use super::market::MarketData;
use super::strategy::{Signal, SignalMap};

/// One executed order. Never mutated after it is appended to the log.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRecord {
    pub date: NaiveDate,
    pub symbol: String,
    pub action: Signal,
    pub quantity: u64,
    pub price: f64,
    /// Cost for a buy, proceeds for a sell.
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Run-loop parameters. Defaults to 10 periods, 100-share orders and a
/// placeholder price of 100 for unquoted symbols.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub periods: usize,
    pub order_size: u64,
    pub fallback_price: f64,
    pub start_date: NaiveDate,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            periods: 10,
            order_size: 100,
            fallback_price: 100.0,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BacktestResults {
    pub initial_capital: f64,
    pub final_capital: f64,
    pub total_return: f64,
    pub trades: Vec<TradeRecord>,
    pub equity_curve: Vec<EquityPoint>,
}

#[derive(Debug, Clone)]
pub struct BacktestEngine {
    pub initial_capital: f64,
    pub current_capital: f64,
    pub positions: HashMap<String, u64>,
    pub trades: Vec<TradeRecord>,
    pub equity_curve: Vec<EquityPoint>,
}

impl BacktestEngine {
    pub fn new(initial_capital: f64) -> Self {
        BacktestEngine {
            initial_capital,
            current_capital: initial_capital,
            positions: HashMap::new(),
            trades: Vec::new(),
            equity_curve: Vec::new(),
        }
    }

    /// Execute a buy order. Fails atomically when the cost exceeds current
    /// capital: no state changes on rejection.
    pub fn buy(
        &mut self,
        symbol: &str,
        quantity: u64,
        price: f64,
        date: NaiveDate,
    ) -> Result<(), QuantkitError> {
        let cost = quantity as f64 * price;
        if cost > self.current_capital {
            return Err(QuantkitError::InsufficientCapital {
                required: cost,
                available: self.current_capital,
            });
        }

        self.current_capital -= cost;
        *self.positions.entry(symbol.to_string()).or_insert(0) += quantity;
        self.trades.push(TradeRecord {
            date,
            symbol: symbol.to_string(),
            action: Signal::Buy,
            quantity,
            price,
            amount: cost,
        });
        Ok(())
    }

    /// Execute a sell order. No partial fills: the full quantity must be held.
    /// The position entry is removed entirely once it reaches zero.
    pub fn sell(
        &mut self,
        symbol: &str,
        quantity: u64,
        price: f64,
        date: NaiveDate,
    ) -> Result<(), QuantkitError> {
        let held = self.positions.get(symbol).copied().unwrap_or(0);
        if held < quantity {
            return Err(QuantkitError::InsufficientShares {
                symbol: symbol.to_string(),
                requested: quantity,
                held,
            });
        }

        let proceeds = quantity as f64 * price;
        self.current_capital += proceeds;
        if held == quantity {
            self.positions.remove(symbol);
        } else {
            self.positions.insert(symbol.to_string(), held - quantity);
        }
        self.trades.push(TradeRecord {
            date,
            symbol: symbol.to_string(),
            action: Signal::Sell,
            quantity,
            price,
            amount: proceeds,
        });
        Ok(())
    }

    pub fn position(&self, symbol: &str) -> u64 {
        self.positions.get(symbol).copied().unwrap_or(0)
    }

    /// Current capital plus the marked value of every position with a quote.
    /// Positions without a quote contribute zero: the holding is treated as
    /// untradeable/stale, not as an error.
    pub fn portfolio_value(&self, current_prices: &HashMap<String, f64>) -> f64 {
        let position_value: f64 = self
            .positions
            .iter()
            .filter_map(|(symbol, &qty)| current_prices.get(symbol).map(|&p| qty as f64 * p))
            .sum();
        self.current_capital + position_value
    }

    pub fn record_equity(&mut self, date: NaiveDate, value: f64) {
        self.equity_curve.push(EquityPoint { date, value });
    }

    /// Drive a fixed number of periods against a strategy callable.
    ///
    /// Each period invokes the strategy with the snapshot and the period
    /// index, attempts every signalled order at the symbol's quote (or the
    /// fallback price when unquoted), and records one equity snapshot. Period
    /// dates advance one day at a time from `config.start_date`.
    pub fn run<F>(&mut self, mut strategy: F, data: &MarketData, config: &RunConfig) -> BacktestResults
    where
        F: FnMut(&MarketData, usize) -> SignalMap,
    {
        // Every symbol gets a valuation price, fallback included, so the
        // equity curve is total across the whole snapshot.
        let prices: HashMap<String, f64> = data
            .iter()
            .map(|(s, sd)| (s.clone(), sd.price.unwrap_or(config.fallback_price)))
            .collect();

        for i in 0..config.periods {
            let date = config.start_date + Duration::days(i as i64);
            let signals = strategy(data, i);

            // Sorted for a deterministic fill order under shared capital.
            let mut ordered: Vec<(&String, &Signal)> = signals.iter().collect();
            ordered.sort_by_key(|(symbol, _)| symbol.as_str());

            for (symbol, signal) in ordered {
                let price = data
                    .get(symbol)
                    .and_then(|sd| sd.price)
                    .unwrap_or(config.fallback_price);

                // Rejected orders (capital or shares) are skipped; the run
                // continues with the remaining signals.
                let _ = match signal {
                    Signal::Buy => self.buy(symbol, config.order_size, price, date),
                    Signal::Sell => self.sell(symbol, config.order_size, price, date),
                };
            }

            let value = self.portfolio_value(&prices);
            self.record_equity(date, value);
        }

        self.results()
    }

    /// Summary of the run so far. Final capital is the last equity snapshot,
    /// or the initial capital when nothing was ever recorded.
    pub fn results(&self) -> BacktestResults {
        let final_capital = self
            .equity_curve
            .last()
            .map(|p| p.value)
            .unwrap_or(self.initial_capital);

        let total_return = if self.initial_capital > 0.0 {
            final_capital / self.initial_capital - 1.0
        } else {
            0.0
        };

        BacktestResults {
            initial_capital: self.initial_capital,
            final_capital,
            total_return,
            trades: self.trades.clone(),
            equity_curve: self.equity_curve.clone(),
        }
    }
}
