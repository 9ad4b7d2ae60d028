//! CLI definition and dispatch.
//!
//! Progress and summaries go to stderr; data output (indicator values,
//! symbol lists) goes to stdout. Exit codes follow the error taxonomy in
//! `domain::error`.

use chrono::{Duration, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::synthetic_adapter::{SyntheticAdapter, DEFAULT_SEED};
use crate::domain::engine::{BacktestEngine, BacktestResults, RunConfig};
use crate::domain::error::QuantkitError;
use crate::domain::indicator::{self, MacdOutput};
use crate::domain::market::{MarketData, SymbolData};
use crate::domain::metrics;
use crate::domain::strategy::{
    alternating_signals, MaCrossoverStrategy, RsiThresholdStrategy, SignalMap, Strategy,
};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;

#[derive(Parser, Debug)]
#[command(name = "quantkit", about = "Technical indicator and backtesting toolkit")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a backtest
    Backtest {
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Directory of per-symbol CSV files; synthetic data when omitted
        #[arg(long)]
        data_dir: Option<PathBuf>,
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
        /// Comma-separated symbol list, overriding the config
        #[arg(long)]
        symbols: Option<String>,
    },
    /// Compute an indicator over one symbol's close history
    Indicator {
        #[arg(value_enum)]
        kind: IndicatorKind,
        #[arg(long)]
        symbol: String,
        #[arg(long)]
        period: Option<usize>,
        #[arg(long, default_value = "2024-01-01")]
        start: String,
        #[arg(long, default_value = "2024-03-31")]
        end: String,
        #[arg(long)]
        data_dir: Option<PathBuf>,
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
    },
    /// List symbols available from the data source
    ListSymbols {
        #[arg(long)]
        data_dir: Option<PathBuf>,
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum IndicatorKind {
    Sma,
    Ema,
    Rsi,
    Macd,
    MacdSensitive,
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Backtest {
            config,
            data_dir,
            seed,
            symbols,
        } => run_backtest(config.as_ref(), data_dir, seed, symbols.as_deref()),
        Command::Indicator {
            kind,
            symbol,
            period,
            start,
            end,
            data_dir,
            seed,
        } => run_indicator(kind, &symbol, period, &start, &end, data_dir, seed),
        Command::ListSymbols { data_dir, seed } => run_list_symbols(data_dir, seed),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = QuantkitError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Strategy selected by `[strategy] kind`.
pub enum ConfiguredStrategy {
    MaCrossover(MaCrossoverStrategy),
    RsiThreshold(RsiThresholdStrategy),
    Alternating,
}

impl ConfiguredStrategy {
    pub fn name(&self) -> &str {
        match self {
            ConfiguredStrategy::MaCrossover(s) => s.name(),
            ConfiguredStrategy::RsiThreshold(s) => s.name(),
            ConfiguredStrategy::Alternating => "Alternating",
        }
    }

    pub fn signals(&self, data: &MarketData, period_index: usize) -> SignalMap {
        match self {
            ConfiguredStrategy::MaCrossover(s) => s.generate_signals(data),
            ConfiguredStrategy::RsiThreshold(s) => s.generate_signals(data),
            ConfiguredStrategy::Alternating => alternating_signals(data, period_index),
        }
    }
}

pub fn build_strategy(adapter: &dyn ConfigPort) -> Result<ConfiguredStrategy, QuantkitError> {
    let kind = adapter
        .get_string("strategy", "kind")
        .unwrap_or_else(|| "alternating".to_string());

    match kind.as_str() {
        "ma_crossover" => {
            let fast = adapter.get_int("strategy", "fast_period", 10);
            let slow = adapter.get_int("strategy", "slow_period", 20);
            if fast <= 0 || slow <= fast {
                return Err(QuantkitError::ConfigInvalid {
                    section: "strategy".into(),
                    key: "fast_period/slow_period".into(),
                    reason: format!("need 0 < fast < slow, got {} and {}", fast, slow),
                });
            }
            Ok(ConfiguredStrategy::MaCrossover(MaCrossoverStrategy::new(
                fast as usize,
                slow as usize,
            )))
        }
        "rsi" => {
            let period = adapter.get_int("strategy", "period", 14);
            let oversold = adapter.get_double("strategy", "oversold", 30.0);
            let overbought = adapter.get_double("strategy", "overbought", 70.0);
            if period <= 0 {
                return Err(QuantkitError::ConfigInvalid {
                    section: "strategy".into(),
                    key: "period".into(),
                    reason: format!("must be positive, got {}", period),
                });
            }
            if oversold >= overbought {
                return Err(QuantkitError::ConfigInvalid {
                    section: "strategy".into(),
                    key: "oversold/overbought".into(),
                    reason: format!(
                        "oversold {} must be below overbought {}",
                        oversold, overbought
                    ),
                });
            }
            Ok(ConfiguredStrategy::RsiThreshold(RsiThresholdStrategy::new(
                period as usize,
                oversold,
                overbought,
            )))
        }
        "alternating" => Ok(ConfiguredStrategy::Alternating),
        other => Err(QuantkitError::ConfigInvalid {
            section: "strategy".into(),
            key: "kind".into(),
            reason: format!(
                "unknown strategy '{}' (expected ma_crossover, rsi or alternating)",
                other
            ),
        }),
    }
}

pub fn build_run_config(adapter: &dyn ConfigPort) -> Result<(f64, RunConfig), QuantkitError> {
    let initial_capital = adapter.get_double("backtest", "initial_capital", 100_000.0);
    if initial_capital <= 0.0 {
        return Err(QuantkitError::ConfigInvalid {
            section: "backtest".into(),
            key: "initial_capital".into(),
            reason: format!("must be positive, got {}", initial_capital),
        });
    }

    let periods = adapter.get_int("backtest", "periods", 10);
    if periods <= 0 {
        return Err(QuantkitError::ConfigInvalid {
            section: "backtest".into(),
            key: "periods".into(),
            reason: format!("must be positive, got {}", periods),
        });
    }

    let order_size = adapter.get_int("backtest", "order_size", 100);
    if order_size <= 0 {
        return Err(QuantkitError::ConfigInvalid {
            section: "backtest".into(),
            key: "order_size".into(),
            reason: format!("must be positive, got {}", order_size),
        });
    }

    let defaults = RunConfig::default();
    let start_date = match adapter.get_string("backtest", "start_date") {
        Some(s) => parse_date(&s, "backtest", "start_date")?,
        None => defaults.start_date,
    };

    Ok((
        initial_capital,
        RunConfig {
            periods: periods as usize,
            order_size: order_size as u64,
            fallback_price: adapter.get_double("backtest", "fallback_price", 100.0),
            start_date,
        },
    ))
}

fn parse_date(value: &str, section: &str, key: &str) -> Result<NaiveDate, QuantkitError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| QuantkitError::ConfigInvalid {
        section: section.into(),
        key: key.into(),
        reason: format!("invalid date '{}' (expected YYYY-MM-DD)", value),
    })
}

pub fn parse_symbols(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn make_data_port(data_dir: Option<PathBuf>, seed: u64) -> Box<dyn DataPort> {
    match data_dir {
        Some(path) => Box::new(CsvAdapter::new(path)),
        None => Box::new(SyntheticAdapter::new(seed)),
    }
}

fn run_backtest(
    config_path: Option<&PathBuf>,
    data_dir: Option<PathBuf>,
    seed: u64,
    symbols_override: Option<&str>,
) -> ExitCode {
    let adapter = match config_path {
        Some(path) => {
            eprintln!("Loading config from {}", path.display());
            match load_config(path) {
                Ok(a) => Some(a),
                Err(code) => return code,
            }
        }
        None => None,
    };

    let (initial_capital, run_config, strategy) = match &adapter {
        Some(a) => {
            let (capital, config) = match build_run_config(a) {
                Ok(v) => v,
                Err(e) => {
                    eprintln!("error: {e}");
                    return (&e).into();
                }
            };
            let strategy = match build_strategy(a) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("error: {e}");
                    return (&e).into();
                }
            };
            (capital, config, strategy)
        }
        None => (
            100_000.0,
            RunConfig::default(),
            ConfiguredStrategy::Alternating,
        ),
    };

    eprintln!("Strategy: {}", strategy.name());

    let data_port = make_data_port(data_dir, seed);

    let symbols: Vec<String> = match symbols_override {
        Some(s) => parse_symbols(s),
        None => match adapter
            .as_ref()
            .and_then(|a| a.get_string("backtest", "symbols"))
        {
            Some(s) => parse_symbols(&s),
            None => match data_port.list_symbols() {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("error: {e}");
                    return (&e).into();
                }
            },
        },
    };
    if symbols.is_empty() {
        eprintln!("error: no symbols configured");
        return ExitCode::from(2);
    }

    // Close history ends the day before the run starts.
    let history_days = adapter
        .as_ref()
        .map(|a| a.get_int("backtest", "history_days", 60))
        .unwrap_or(60)
        .max(1);
    let history_end = run_config.start_date - Duration::days(1);
    let history_start = run_config.start_date - Duration::days(history_days);

    let mut data = MarketData::new();
    for symbol in &symbols {
        match data_port.fetch_ohlcv(symbol, history_start, history_end) {
            Ok(bars) => {
                data.insert(symbol.clone(), SymbolData::from_bars(&bars));
            }
            Err(e) => {
                eprintln!("warning: skipping {} ({})", symbol, e);
            }
        }
    }
    if data.is_empty() {
        eprintln!("error: no symbols with data to backtest");
        return ExitCode::from(3);
    }

    eprintln!(
        "Running backtest: {} symbols, {} periods from {}",
        data.len(),
        run_config.periods,
        run_config.start_date,
    );

    let mut engine = BacktestEngine::new(initial_capital);
    let results = engine.run(|d, i| strategy.signals(d, i), &data, &run_config);

    let risk_free_rate = adapter
        .as_ref()
        .map(|a| a.get_double("backtest", "risk_free_rate", 0.0))
        .unwrap_or(0.0);

    print_summary(&results, risk_free_rate);
    ExitCode::SUCCESS
}

fn print_summary(results: &BacktestResults, risk_free_rate: f64) {
    let equity: Vec<f64> = results.equity_curve.iter().map(|p| p.value).collect();
    let returns = if equity.len() >= 2 {
        metrics::simple_returns(&equity, 1).unwrap_or_default()
    } else {
        Vec::new()
    };
    let mean_return = if returns.is_empty() {
        0.0
    } else {
        returns.iter().sum::<f64>() / returns.len() as f64
    };

    eprintln!("\n=== Backtest Results ===");
    eprintln!("Initial Capital:  {:.2}", results.initial_capital);
    eprintln!("Final Capital:    {:.2}", results.final_capital);
    eprintln!("Total Return:     {:.2}%", results.total_return * 100.0);
    eprintln!(
        "Annualized:       {:.2}%",
        metrics::annualize_return(mean_return, metrics::PERIODS_PER_YEAR) * 100.0
    );
    eprintln!(
        "Sharpe Ratio:     {:.2}",
        metrics::sharpe_ratio(&returns, risk_free_rate, metrics::PERIODS_PER_YEAR)
    );
    eprintln!(
        "Max Drawdown:     {:.1}%",
        metrics::max_drawdown(&equity) * 100.0
    );
    eprintln!("Total Trades:     {}", results.trades.len());
}

fn run_indicator(
    kind: IndicatorKind,
    symbol: &str,
    period: Option<usize>,
    start: &str,
    end: &str,
    data_dir: Option<PathBuf>,
    seed: u64,
) -> ExitCode {
    let start_date = match parse_date(start, "indicator", "start") {
        Ok(d) => d,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let end_date = match parse_date(end, "indicator", "end") {
        Ok(d) => d,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let data_port = make_data_port(data_dir, seed);
    let bars = match data_port.fetch_ohlcv(symbol, start_date, end_date) {
        Ok(bars) => bars,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let closes = crate::domain::ohlcv::closes(&bars);
    eprintln!("Fetched {} closes for {}", closes.len(), symbol);

    match kind {
        IndicatorKind::Sma => {
            print_series(indicator::sma(&closes, period.unwrap_or(20)))
        }
        IndicatorKind::Ema => {
            print_series(indicator::ema(&closes, period.unwrap_or(20)))
        }
        IndicatorKind::Rsi => {
            print_series(indicator::rsi(&closes, period.unwrap_or(indicator::rsi::DEFAULT_PERIOD)))
        }
        IndicatorKind::Macd => print_macd(indicator::macd_default(&closes)),
        IndicatorKind::MacdSensitive => print_macd(indicator::macd_sensitive(&closes)),
    }
}

fn print_series(result: Result<Vec<f64>, QuantkitError>) -> ExitCode {
    match result {
        Ok(values) => {
            for v in values {
                println!("{:.6}", v);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn print_macd(result: Result<MacdOutput, QuantkitError>) -> ExitCode {
    match result {
        Ok(out) => {
            println!("macd,signal,histogram");
            for i in 0..out.macd.len() {
                println!(
                    "{:.6},{:.6},{:.6}",
                    out.macd[i], out.signal[i], out.histogram[i]
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_list_symbols(data_dir: Option<PathBuf>, seed: u64) -> ExitCode {
    let data_port = make_data_port(data_dir, seed);
    match data_port.list_symbols() {
        Ok(symbols) => {
            for symbol in symbols {
                println!("{}", symbol);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let (initial_capital, run_config) = match build_run_config(&adapter) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let strategy = match build_strategy(&adapter) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!("Config validated successfully");
    eprintln!("  strategy:         {}", strategy.name());
    eprintln!("  initial capital:  {:.2}", initial_capital);
    eprintln!("  periods:          {}", run_config.periods);
    eprintln!("  order size:       {}", run_config.order_size);
    eprintln!("  start date:       {}", run_config.start_date);
    ExitCode::SUCCESS
}
