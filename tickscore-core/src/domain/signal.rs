//! Signal — the engine's output.
//!
//! A signal is immutable once produced and owned by the caller. It carries the
//! direction, a confidence in `[0.75, 0.95]` and the tick instant that fired it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Directional call of a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalDirection {
    Buy,
    Sell,
}

impl SignalDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        }
    }
}

impl fmt::Display for SignalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub direction: SignalDirection,
    pub confidence: f64,
    pub timestamp: DateTime<Utc>,
}

impl Signal {
    /// Number of lit bars out of `total` for a strength meter.
    pub fn strength_bars(&self, total: usize) -> usize {
        let lit = (self.confidence * total as f64).round();
        (lit.max(0.0) as usize).min(total)
    }
}
