//! TickScore Core — rolling market state, indicators and the signal engine.
//!
//! This crate contains the periodic signal-generation engine:
//! - Domain types (market snapshots, signals, trend direction)
//! - Bounded rolling price window with volatility and trend statistics
//! - Window indicators (SMA, EMA, RSI, MACD, stochastic)
//! - Cooldown-gated, favorability-filtered weighted scoring
//! - Per-pair signal desk, period cadence and price feeds

pub mod boundary;
pub mod config;
pub mod desk;
pub mod domain;
pub mod engine;
pub mod feed;
pub mod indicators;
pub mod market;

pub use config::{ConfigError, EngineConfig};
pub use desk::{PairSignal, SignalDesk};
pub use domain::{MarketSnapshot, Signal, SignalDirection, TrendDirection};
pub use engine::{SignalEngine, TickOutcome};
pub use market::MarketState;
