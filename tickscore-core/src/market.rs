//! MarketState — bounded rolling price window plus derived statistics.
//!
//! `update` is the only mutator. Statistics follow a first-computation policy:
//! until enough samples exist they keep their previous (initially default)
//! values instead of failing.

use serde::Serialize;

use crate::config::WindowConfig;
use crate::domain::TrendDirection;
use crate::indicators::{mean_abs_change, Indicator, Sma};

/// Volatility reported before the first computation.
pub const INITIAL_VOLATILITY: f64 = 0.5;

#[derive(Debug, Clone)]
pub struct MarketState {
    prices: Vec<f64>,
    capacity: usize,
    volatility_min_samples: usize,
    short_ma: Sma,
    long_ma: Sma,
    volatility: f64,
    trend_direction: TrendDirection,
    trend_strength: f64,
}

/// Copy of the derived statistics, for logs and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarketStats {
    pub samples: usize,
    pub volatility: f64,
    pub trend_direction: TrendDirection,
    pub trend_strength: f64,
}

impl MarketState {
    /// Empty state for `window`.
    ///
    /// # Panics
    /// If a trend period is zero or `capacity < trend_long_period`. Windows
    /// taken from an [`EngineConfig`](crate::EngineConfig) that passed
    /// `validate` never panic.
    pub fn new(window: &WindowConfig) -> Self {
        assert!(
            window.capacity >= window.trend_long_period,
            "window capacity must hold the long trend period"
        );
        Self {
            prices: Vec::with_capacity(window.capacity + 1),
            capacity: window.capacity,
            volatility_min_samples: window.volatility_min_samples,
            short_ma: Sma::new(window.trend_short_period),
            long_ma: Sma::new(window.trend_long_period),
            volatility: INITIAL_VOLATILITY,
            trend_direction: TrendDirection::Flat,
            trend_strength: 0.0,
        }
    }

    /// Append a sample, evict the oldest past capacity, refresh statistics.
    pub fn update(&mut self, price: f64) {
        self.prices.push(price);
        if self.prices.len() > self.capacity {
            let excess = self.prices.len() - self.capacity;
            self.prices.drain(..excess);
        }
        self.refresh_volatility();
        self.refresh_trend();
    }

    fn refresh_volatility(&mut self) {
        if self.prices.len() < self.volatility_min_samples {
            return;
        }
        self.volatility = mean_abs_change(&self.prices);
    }

    fn refresh_trend(&mut self) {
        if self.prices.len() < self.long_ma.lookback() {
            return;
        }
        let short = self.short_ma.compute(&self.prices);
        let long = self.long_ma.compute(&self.prices);
        // Equal averages read as a downtrend.
        self.trend_direction = if short > long {
            TrendDirection::Up
        } else {
            TrendDirection::Down
        };
        // Strength stays non-negative: a non-positive long average leaves it as is.
        if long > 0.0 {
            self.trend_strength = (short - long).abs() / long;
        }
    }

    /// Drop all samples and restore the initial statistics.
    pub fn reset(&mut self) {
        self.prices.clear();
        self.volatility = INITIAL_VOLATILITY;
        self.trend_direction = TrendDirection::Flat;
        self.trend_strength = 0.0;
    }

    /// Samples oldest first.
    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    pub fn latest(&self) -> Option<f64> {
        self.prices.last().copied()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Window settings this state was built with.
    pub fn window(&self) -> WindowConfig {
        WindowConfig {
            capacity: self.capacity,
            volatility_min_samples: self.volatility_min_samples,
            trend_short_period: self.short_ma.period(),
            trend_long_period: self.long_ma.period(),
        }
    }

    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    pub fn trend_direction(&self) -> TrendDirection {
        self.trend_direction
    }

    pub fn trend_strength(&self) -> f64 {
        self.trend_strength
    }

    pub fn stats(&self) -> MarketStats {
        MarketStats {
            samples: self.prices.len(),
            volatility: self.volatility,
            trend_direction: self.trend_direction,
            trend_strength: self.trend_strength,
        }
    }
}

impl Default for MarketState {
    fn default() -> Self {
        Self::new(&WindowConfig::default())
    }
}
