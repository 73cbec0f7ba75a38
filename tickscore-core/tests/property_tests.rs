//! Property tests for engine invariants.
//!
//! Uses proptest to verify:
//! 1. Cooldown — fired signals are never closer than the cooldown, for any tick spacing
//! 2. Confidence bounds — any score split yields a confidence in [floor, ceiling]
//! 3. Window bound — the rolling window never exceeds its capacity
//! 4. Indicator ranges — stochastic is always finite, RSI stays in [0, 100]

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use tickscore_core::config::{ConfidenceConfig, ScoringConfig};
use tickscore_core::engine::{IndicatorReadout, ScoreCard};
use tickscore_core::indicators::{stochastic, Indicator, MacdValue, Rsi};
use tickscore_core::{MarketSnapshot, MarketState, SignalEngine, TrendDirection};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_price() -> impl Strategy<Value = f64> {
    (0.5..500.0_f64).prop_map(|p| (p * 10_000.0).round() / 10_000.0)
}

fn arb_trend() -> impl Strategy<Value = TrendDirection> {
    prop_oneof![
        Just(TrendDirection::Up),
        Just(TrendDirection::Down),
        Just(TrendDirection::Flat),
    ]
}

fn arb_macd() -> impl Strategy<Value = Option<MacdValue>> {
    proptest::option::of((-5.0..5.0_f64, -5.0..5.0_f64).prop_map(|(macd, signal)| MacdValue {
        macd,
        signal,
        histogram: macd - signal,
    }))
}

fn arb_readout() -> impl Strategy<Value = IndicatorReadout> {
    (0.0..=100.0_f64, arb_macd(), -50.0..150.0_f64, arb_trend()).prop_map(
        |(rsi, macd, stochastic, trend)| IndicatorReadout {
            rsi,
            macd,
            stochastic,
            trend,
        },
    )
}

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 4, 10, 0, 0).unwrap()
}

// ── 1. Cooldown ──────────────────────────────────────────────────────

proptest! {
    /// Whatever the spacing of ticks, two signals are at least a cooldown apart.
    #[test]
    fn signals_respect_cooldown(
        steps in prop::collection::vec((1_i64..120_000, -0.02..0.02_f64), 60..240),
    ) {
        let mut engine = SignalEngine::default();
        let mut now = t0();
        let mut price = 100.0_f64;
        let mut fired: Vec<DateTime<Utc>> = Vec::new();

        for (gap_ms, change) in steps {
            now += Duration::milliseconds(gap_ms);
            price *= 1.0 + change;
            let snapshot = MarketSnapshot::new(price, price * 1.01, price * 0.99).unwrap();
            if let Some(signal) = engine.tick(now, &snapshot) {
                prop_assert_eq!(signal.timestamp, now);
                fired.push(now);
            }
        }

        for pair in fired.windows(2) {
            prop_assert!(pair[1] - pair[0] >= Duration::seconds(60));
        }
    }
}

// ── 2. Confidence bounds ─────────────────────────────────────────────

proptest! {
    /// Confidence is present exactly when something scored, and always clamped.
    #[test]
    fn confidence_is_clamped(
        readout in arb_readout(),
        volatility in 0.0..1.0_f64,
        trend_strength in 0.0..0.1_f64,
    ) {
        let card = ScoreCard::score(&readout, &ScoringConfig::default());
        prop_assert!(card.buy >= 0.0);
        prop_assert!(card.sell >= 0.0);

        match card.confidence(volatility, trend_strength, &ConfidenceConfig::default()) {
            Some(confidence) => {
                prop_assert!(card.total() > 0.0);
                prop_assert!((0.75..=0.95).contains(&confidence), "confidence {}", confidence);
            }
            None => prop_assert_eq!(card.total(), 0.0),
        }
    }

    /// Any non-flat trend scores, so confidence is always available.
    #[test]
    fn trending_readout_always_scores(readout in arb_readout()) {
        prop_assume!(readout.trend != TrendDirection::Flat);
        let card = ScoreCard::score(&readout, &ScoringConfig::default());
        prop_assert!(card.confidence(0.0, 0.0, &ConfidenceConfig::default()).is_some());
    }
}

// ── 3. Window bound ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn window_never_exceeds_capacity(prices in prop::collection::vec(arb_price(), 0..300)) {
        let mut state = MarketState::default();
        for (i, &price) in prices.iter().enumerate() {
            state.update(price);
            prop_assert_eq!(state.len(), (i + 1).min(state.capacity()));
            prop_assert!(state.volatility() >= 0.0);
            prop_assert!(state.trend_strength() >= 0.0);
        }
        if let Some(&last) = prices.last() {
            prop_assert_eq!(state.latest(), Some(last));
        }
    }
}

// ── 4. Indicator ranges ──────────────────────────────────────────────

proptest! {
    #[test]
    fn stochastic_is_finite(
        low in arb_price(),
        width in 0.0..10.0_f64,
        position in 0.0..=1.0_f64,
    ) {
        let high = low + width;
        let price = low + width * position;
        let snapshot = MarketSnapshot::new(price.clamp(low, high), high, low).unwrap();
        let value = stochastic(&snapshot);
        prop_assert!(value.is_finite());
        prop_assert!((0.0..=100.0).contains(&value), "stochastic {}", value);
    }

    #[test]
    fn rsi_stays_in_range(prices in prop::collection::vec(arb_price(), 0..60)) {
        let value = Rsi::new(14).compute(&prices);
        prop_assert!(value.is_finite());
        prop_assert!((0.0..=100.0).contains(&value), "rsi {}", value);
    }
}
