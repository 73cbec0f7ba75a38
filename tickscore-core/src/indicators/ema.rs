//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA = k * price + (1 - k) * EMA_prev, k = 2 / (period + 1).
//! Seed: SMA of the first `period` samples of the slice.
//! Lookback: period. Fewer samples → 0.

use super::Indicator;

#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    name: String,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "EMA period must be >= 1");
        Self {
            period,
            name: format!("ema_{period}"),
        }
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

impl Indicator for Ema {
    type Output = f64;

    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, prices: &[f64]) -> f64 {
        if prices.len() < self.period {
            return 0.0;
        }

        let k = 2.0 / (self.period as f64 + 1.0);
        let seed = prices[..self.period].iter().sum::<f64>() / self.period as f64;

        prices[self.period..]
            .iter()
            .fold(seed, |ema, &price| price * k + ema * (1.0 - k))
    }
}
