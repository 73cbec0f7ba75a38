//! MarketSnapshot — the per-tick market observation.

use serde::Serialize;
use thiserror::Error;

/// Current price plus the high/low of the covering period.
///
/// Only constructible through [`MarketSnapshot::new`], so every snapshot that
/// reaches the engine holds finite values with `period_high >= period_low`.
/// The current price is not required to sit inside the range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarketSnapshot {
    current_price: f64,
    period_high: f64,
    period_low: f64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SnapshotError {
    #[error("non-finite {field}: {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("inverted period range: high {high} < low {low}")]
    InvertedRange { high: f64, low: f64 },
}

impl MarketSnapshot {
    pub fn new(
        current_price: f64,
        period_high: f64,
        period_low: f64,
    ) -> Result<Self, SnapshotError> {
        for (field, value) in [
            ("current_price", current_price),
            ("period_high", period_high),
            ("period_low", period_low),
        ] {
            if !value.is_finite() {
                return Err(SnapshotError::NonFinite { field, value });
            }
        }
        if period_high < period_low {
            return Err(SnapshotError::InvertedRange {
                high: period_high,
                low: period_low,
            });
        }
        Ok(Self {
            current_price,
            period_high,
            period_low,
        })
    }

    /// Snapshot with a zero-width range at `price`.
    pub fn flat(price: f64) -> Result<Self, SnapshotError> {
        Self::new(price, price, price)
    }

    pub fn current_price(&self) -> f64 {
        self.current_price
    }

    pub fn period_high(&self) -> f64 {
        self.period_high
    }

    pub fn period_low(&self) -> f64 {
        self.period_low
    }

    pub fn range(&self) -> f64 {
        self.period_high - self.period_low
    }
}
