//! Core domain types and logic.

pub mod ohlcv;
pub mod series;
pub mod signal;
pub mod indicator;
pub mod strategy;
pub mod position;
pub mod trade;
pub mod execution;
pub mod portfolio;
pub mod event;
pub mod backtest;
pub mod metrics;
pub mod config_validation;
pub mod error;
