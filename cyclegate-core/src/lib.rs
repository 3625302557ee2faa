//! CycleGate Core: single-instrument breakout strategy with per-cycle gating.
//!
//! This crate contains:
//! - Domain types (ticks, bars, orders, stop orders, trades, positions)
//! - Bar generation (ticks → 1-minute → cycle bars) and the indicator window
//! - The strategy core: cycle controller, entry evaluator, stop attachment,
//!   exit evaluator, and the two-flag cycle gate
//! - The execution gateway trait and an in-memory paper gateway
//! - Configuration, tick/bar CSV loading, and a replay host loop

pub mod bars;
pub mod config;
pub mod data;
pub mod domain;
pub mod execution;
pub mod indicators;
pub mod replay;
pub mod strategy;

pub use config::{ConfigError, StrategyConfig};
pub use replay::{run_replay, ReplaySummary};
pub use strategy::BreakoutStrategy;
