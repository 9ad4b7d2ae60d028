//! Core domain types and logic.

pub mod ohlcv;
pub mod market;
pub mod indicator;
pub mod fundamental;
pub mod strategy;
pub mod engine;
pub mod metrics;
pub mod error;
