//! Core domain types and logic.

pub mod alignment;
pub mod backtest;
pub mod config_validation;
pub mod error;
pub mod indicator;
pub mod ledger;
pub mod pooled_backtest;
pub mod price;
pub mod reserve_pool;
pub mod schedule;
pub mod signal;
pub mod sizing;
pub mod strategy;
pub mod tier;
pub mod xirr;
pub mod yearly;
