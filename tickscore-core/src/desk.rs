//! Signal desk — one independent engine per trading pair.
//!
//! Engines never share state; the desk only routes ticks by pair, applies the
//! host's minimum-confidence threshold and keeps in-memory daily counters.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::config::{ConfigError, EngineConfig};
use crate::domain::{MarketSnapshot, Pair, Signal, SignalDirection};
use crate::engine::SignalEngine;

/// Pairs offered when the host supplies no list of its own.
pub const DEFAULT_PAIRS: &[&str] = &[
    "USD/BRL OTC",
    "USD/ARS OTC",
    "USD/IDR OTC",
    "USD/INR OTC",
    "NZD/CAD OTC",
    "EUR/CHF OTC",
    "CAD/JPY OTC",
    "USD/BDT OTC",
    "AUD/USD OTC",
    "EUR/GBP OTC",
];

pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.75;

/// A delivered signal tagged with its pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairSignal {
    pub pair: Pair,
    #[serde(flatten)]
    pub signal: Signal,
}

/// Signal counters for the current UTC day.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeskStats {
    pub day: Option<NaiveDate>,
    pub signals_today: u32,
    pub buys_today: u32,
    pub sells_today: u32,
    /// Fired by an engine but below the desk's minimum confidence.
    pub suppressed_today: u32,
    pub total_signals: u64,
}

impl DeskStats {
    fn roll(&mut self, now: DateTime<Utc>) {
        let today = now.date_naive();
        if self.day != Some(today) {
            *self = Self {
                day: Some(today),
                total_signals: self.total_signals,
                ..Self::default()
            };
        }
    }

    fn record(&mut self, now: DateTime<Utc>, direction: SignalDirection) {
        self.roll(now);
        self.signals_today += 1;
        self.total_signals += 1;
        match direction {
            SignalDirection::Buy => self.buys_today += 1,
            SignalDirection::Sell => self.sells_today += 1,
        }
    }

    fn record_suppressed(&mut self, now: DateTime<Utc>) {
        self.roll(now);
        self.suppressed_today += 1;
    }
}

#[derive(Debug, Clone)]
pub struct SignalDesk {
    config: EngineConfig,
    min_confidence: f64,
    engines: BTreeMap<Pair, SignalEngine>,
    stats: DeskStats,
}

impl SignalDesk {
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            engines: BTreeMap::new(),
            stats: DeskStats::default(),
        })
    }

    pub fn with_min_confidence(mut self, min_confidence: f64) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&min_confidence) {
            return Err(ConfigError::Invalid(format!(
                "min_confidence must be within [0, 1], got {min_confidence}"
            )));
        }
        self.min_confidence = min_confidence;
        Ok(self)
    }

    /// Pre-register engines for `pairs`.
    pub fn with_pairs<I, P>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Pair>,
    {
        for pair in pairs {
            let config = &self.config;
            self.engines
                .entry(pair.into())
                .or_insert_with(|| SignalEngine::from_validated(config.clone()));
        }
        self
    }

    /// Route one tick to the pair's engine, creating it on first use.
    pub fn tick(
        &mut self,
        pair: &str,
        now: DateTime<Utc>,
        snapshot: &MarketSnapshot,
    ) -> Option<PairSignal> {
        // The pair name is only allocated when its engine is created.
        let signal = match self.engines.get_mut(pair) {
            Some(engine) => engine.tick(now, snapshot),
            None => {
                let mut engine = SignalEngine::from_validated(self.config.clone());
                let signal = engine.tick(now, snapshot);
                self.engines.insert(pair.to_string(), engine);
                signal
            }
        }?;

        if signal.confidence < self.min_confidence {
            debug!(
                pair,
                confidence = signal.confidence,
                min_confidence = self.min_confidence,
                "signal below minimum confidence"
            );
            self.stats.record_suppressed(now);
            return None;
        }

        self.stats.record(now, signal.direction);
        info!(
            pair,
            direction = %signal.direction,
            confidence = signal.confidence,
            "signal delivered"
        );
        Some(PairSignal {
            pair: pair.to_string(),
            signal,
        })
    }

    pub fn engine(&self, pair: &str) -> Option<&SignalEngine> {
        self.engines.get(pair)
    }

    pub fn remove(&mut self, pair: &str) -> Option<SignalEngine> {
        self.engines.remove(pair)
    }

    pub fn pairs(&self) -> impl Iterator<Item = &str> {
        self.engines.keys().map(String::as_str)
    }

    pub fn min_confidence(&self) -> f64 {
        self.min_confidence
    }

    pub fn stats(&self) -> &DeskStats {
        &self.stats
    }
}
