//! Signal engine — cooldown-gated, favorability-filtered indicator scoring.
//!
//! One engine owns one `MarketState` and serves one instrument. Every tick runs
//! the gates in order:
//!
//! 1. Cooldown: within `cooldown` of the last signal → no signal, nothing mutated
//! 2. Market update: the tick price enters the rolling window
//! 3. Favorability: volatility and trend strength must both clear their minimums
//! 4. Scoring: RSI, MACD, stochastic and trend vote; confidence from the split
//!
//! Only a produced signal moves `last_signal_time`.

pub mod outcome;
pub mod scoring;

pub use outcome::TickOutcome;
pub use scoring::{IndicatorReadout, ScoreCard};

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use crate::config::{ConfigError, EngineConfig};
use crate::domain::{MarketSnapshot, Signal};
use crate::indicators::{stochastic, Indicator, Macd, Rsi};
use crate::market::MarketState;

#[derive(Debug, Clone)]
pub struct SignalEngine {
    config: EngineConfig,
    state: MarketState,
    rsi: Rsi,
    macd: Macd,
    cooldown: Duration,
    last_signal_time: Option<DateTime<Utc>>,
}

impl SignalEngine {
    /// Build an engine with a fresh market state. The config is validated.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    /// Build an engine around an existing market state.
    ///
    /// The state must have been built from `config.window`.
    pub fn with_state(config: EngineConfig, state: MarketState) -> Result<Self, ConfigError> {
        let window = state.window();
        if window != config.window {
            return Err(ConfigError::Invalid(format!(
                "market state window {window:?} does not match config window {:?}",
                config.window
            )));
        }
        let mut engine = Self::new(config)?;
        engine.state = state;
        Ok(engine)
    }

    pub(crate) fn from_validated(config: EngineConfig) -> Self {
        let ind = &config.indicators;
        Self {
            state: MarketState::new(&config.window),
            rsi: Rsi::new(ind.rsi_period),
            macd: Macd::new(ind.macd_fast, ind.macd_slow, ind.macd_signal),
            cooldown: config.cooldown(),
            last_signal_time: None,
            config,
        }
    }

    /// Evaluate one period boundary. Returns the signal, if one fired.
    pub fn tick(&mut self, now: DateTime<Utc>, snapshot: &MarketSnapshot) -> Option<Signal> {
        self.evaluate(now, snapshot).into_signal()
    }

    /// Same as [`tick`](Self::tick), but reports which gate decided the outcome.
    pub fn evaluate(&mut self, now: DateTime<Utc>, snapshot: &MarketSnapshot) -> TickOutcome {
        if let Some(remaining) = self.cooldown_remaining(now) {
            debug!(%now, remaining_secs = remaining.num_seconds(), "cooldown active");
            return TickOutcome::CoolingDown { remaining };
        }

        self.state.update(snapshot.current_price());

        let volatility = self.state.volatility();
        let trend_strength = self.state.trend_strength();
        if !self.is_favorable() {
            debug!(
                %now,
                samples = self.state.len(),
                volatility,
                trend_strength,
                "conditions unfavorable"
            );
            return TickOutcome::Unfavorable {
                volatility,
                trend_strength,
            };
        }

        let readout = self.readout(snapshot);
        let card = ScoreCard::score(&readout, &self.config.scoring);
        let Some(confidence) = card.confidence(volatility, trend_strength, &self.config.confidence)
        else {
            debug!(%now, "no indicator scored");
            return TickOutcome::NoScore;
        };

        let signal = Signal {
            direction: card.direction(),
            confidence,
            timestamp: now,
        };
        self.last_signal_time = Some(now);
        info!(
            %now,
            direction = %signal.direction,
            confidence,
            buy_score = card.buy,
            sell_score = card.sell,
            rsi = readout.rsi,
            stochastic = readout.stochastic,
            "signal fired"
        );
        TickOutcome::Fired(signal)
    }

    fn is_favorable(&self) -> bool {
        let gate = &self.config.gate;
        self.state.volatility() > gate.min_volatility
            && self.state.trend_strength() > gate.min_trend_strength
    }

    /// Indicator values over the current window for `snapshot`.
    pub fn readout(&self, snapshot: &MarketSnapshot) -> IndicatorReadout {
        let prices = self.state.prices();
        IndicatorReadout {
            rsi: self.rsi.compute(prices),
            macd: self.macd.compute(prices),
            stochastic: stochastic(snapshot),
            trend: self.state.trend_direction(),
        }
    }

    /// Time left before the engine may fire again, or `None` when armed.
    pub fn cooldown_remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        let last = self.last_signal_time?;
        let elapsed = now - last;
        (elapsed < self.cooldown).then(|| self.cooldown - elapsed)
    }

    /// Forget all samples and the last signal time.
    pub fn reset(&mut self) {
        self.state.reset();
        self.last_signal_time = None;
    }

    pub fn state(&self) -> &MarketState {
        &self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn last_signal_time(&self) -> Option<DateTime<Utc>> {
        self.last_signal_time
    }
}

impl Default for SignalEngine {
    fn default() -> Self {
        Self::from_validated(EngineConfig::default())
    }
}
