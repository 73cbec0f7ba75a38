//! Mean absolute successive change.
//!
//! Sum of |p[i] - p[i-1]| over the window, divided by the number of samples
//! (not the number of deltas). Empty window → 0.

pub fn mean_abs_change(prices: &[f64]) -> f64 {
    if prices.is_empty() {
        return 0.0;
    }
    let total: f64 = prices.windows(2).map(|w| (w[1] - w[0]).abs()).sum();
    total / prices.len() as f64
}
