//! Technical indicators over the rolling price window.
//!
//! Every indicator is evaluated at the latest sample only: price window in,
//! one value out. Insufficient history never fails. Each indicator resolves
//! to a documented neutral value instead (RSI 50, EMA/SMA 0, MACD `None`).

pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;
pub mod stochastic;
pub mod volatility;

pub use ema::Ema;
pub use macd::{Macd, MacdValue};
pub use rsi::Rsi;
pub use sma::Sma;
pub use stochastic::stochastic;
pub use volatility::mean_abs_change;

/// Trait for window indicators.
///
/// # Look-ahead guard
/// `compute` sees only the samples it is handed; the engine always passes the
/// window as of the current tick, oldest first.
pub trait Indicator: Send + Sync {
    type Output;

    /// Human-readable name (e.g., "rsi_14").
    fn name(&self) -> &str;

    /// Number of samples needed before the output stops being the neutral value.
    fn lookback(&self) -> usize;

    fn compute(&self, prices: &[f64]) -> Self::Output;
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
