//! Moving Average Convergence Divergence (MACD).
//!
//! macd      = EMA(fast) - EMA(slow), both over the whole window
//! signal    = EMA(signal_period) over the last `signal_period` raw prices
//! histogram = macd - signal
//!
//! The signal line is taken over raw prices rather than over a MACD-line
//! series. With exactly `signal_period` samples the EMA is its seed, so the
//! signal line is the simple average of the most recent prices.
//! Lookback: slow + signal_period. Fewer samples → `None` (unavailable).

use serde::{Deserialize, Serialize};

use super::{Ema, Indicator};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdValue {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

#[derive(Debug, Clone)]
pub struct Macd {
    fast: Ema,
    slow: Ema,
    signal: Ema,
    name: String,
}

impl Macd {
    pub fn new(fast_period: usize, slow_period: usize, signal_period: usize) -> Self {
        assert!(
            fast_period < slow_period,
            "MACD fast period must be < slow period"
        );
        Self {
            fast: Ema::new(fast_period),
            slow: Ema::new(slow_period),
            signal: Ema::new(signal_period),
            name: format!("macd_{fast_period}_{slow_period}_{signal_period}"),
        }
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self::new(12, 26, 9)
    }
}

impl Indicator for Macd {
    type Output = Option<MacdValue>;

    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.slow.period() + self.signal.period()
    }

    fn compute(&self, prices: &[f64]) -> Option<MacdValue> {
        if prices.len() < self.lookback() {
            return None;
        }

        let macd = self.fast.compute(prices) - self.slow.compute(prices);
        let recent = &prices[prices.len() - self.signal.period()..];
        let signal = self.signal.compute(recent);

        Some(MacdValue {
            macd,
            signal,
            histogram: macd - signal,
        })
    }
}
