//! Simple Moving Average (SMA).
//!
//! Mean of the most recent `period` samples.
//! Lookback: period. Fewer samples → 0.

use super::Indicator;

#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    name: String,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "SMA period must be >= 1");
        Self {
            period,
            name: format!("sma_{period}"),
        }
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

impl Indicator for Sma {
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
        let tail = &prices[prices.len() - self.period..];
        tail.iter().sum::<f64>() / self.period as f64
    }
}
