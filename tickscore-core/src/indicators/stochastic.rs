//! Stochastic oscillator (%K) for a single period.
//!
//! %K = (price - low) / (high - low) * 100
//! A flat range (high == low) yields exactly 50.

use crate::domain::MarketSnapshot;

pub const FLAT_RANGE_STOCHASTIC: f64 = 50.0;

pub fn stochastic(snapshot: &MarketSnapshot) -> f64 {
    let range = snapshot.range();
    if range == 0.0 {
        return FLAT_RANGE_STOCHASTIC;
    }
    (snapshot.current_price() - snapshot.period_low()) / range * 100.0
}
