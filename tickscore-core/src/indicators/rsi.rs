//! Relative Strength Index (RSI).
//!
//! Simple averages of gains and losses over the final `period` deltas.
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! Lookback: period + 1 samples.
//! Edge cases: fewer samples → 50; avg_loss == 0 → 100 (a flat window included).

use super::Indicator;

/// Value reported until enough samples exist.
pub const NEUTRAL_RSI: f64 = 50.0;

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    name: String,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self {
            period,
            name: format!("rsi_{period}"),
        }
    }
}

impl Indicator for Rsi {
    type Output = f64;

    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period + 1
    }

    fn compute(&self, prices: &[f64]) -> f64 {
        if prices.len() < self.lookback() {
            return NEUTRAL_RSI;
        }

        let tail = &prices[prices.len() - self.lookback()..];
        let (gains, losses) = tail.windows(2).fold((0.0, 0.0), |(g, l), w| {
            let change = w[1] - w[0];
            if change > 0.0 {
                (g + change, l)
            } else {
                (g, l - change)
            }
        });

        let avg_gain = gains / self.period as f64;
        let avg_loss = losses / self.period as f64;
        if avg_loss == 0.0 {
            return 100.0;
        }
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::assert_approx;

    #[test]
    fn rsi_all_gains() {
        let rsi = Rsi::new(3);
        assert_approx(rsi.compute(&[100.0, 101.0, 102.0, 103.0, 104.0]), 100.0, 1e-9);
    }

    #[test]
    fn rsi_all_losses() {
        let rsi = Rsi::new(3);
        assert_approx(rsi.compute(&[105.0, 104.0, 103.0, 102.0]), 0.0, 1e-9);
    }

    #[test]
    fn rsi_flat_window_reads_as_no_losses() {
        assert_eq!(Rsi::new(14).compute(&[1.25; 30]), 100.0);
    }

    #[test]
    fn rsi_mixed() {
        // Final 3 deltas: -0.25, -0.48, +0.72
        // gains = 0.72, losses = 0.73 → RSI = 100 - 100 / (1 + 0.72/0.73)
        let rsi = Rsi::new(3);
        let value = rsi.compute(&[44.0, 44.34, 44.09, 43.61, 44.33]);
        assert_approx(value, 100.0 - 100.0 / (1.0 + 0.72 / 0.73), 1e-9);
    }

    #[test]
    fn rsi_only_reads_final_deltas() {
        // A crash far back in the window does not affect the value.
        let mut prices = vec![500.0, 1.0];
        prices.extend((0..15).map(|i| 10.0 + i as f64));
        assert_eq!(Rsi::new(14).compute(&prices), 100.0);
    }

    #[test]
    fn rsi_insufficient_is_neutral() {
        assert_eq!(Rsi::new(14).compute(&[1.0; 14]), NEUTRAL_RSI);
    }

    #[test]
    fn rsi_bounds() {
        let prices = [100.0, 105.0, 98.0, 110.0, 95.0, 115.0, 90.0, 120.0];
        let rsi = Rsi::new(3);
        for end in 0..=prices.len() {
            let v = rsi.compute(&prices[..end]);
            assert!((0.0..=100.0).contains(&v), "RSI out of bounds at {end}: {v}");
        }
    }

    #[test]
    fn rsi_lookback() {
        assert_eq!(Rsi::new(14).lookback(), 15);
    }
}
