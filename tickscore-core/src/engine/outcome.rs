//! Per-tick decision record.

use chrono::Duration;

use crate::domain::Signal;

/// Why a tick did or did not produce a signal.
///
/// Gates run in order cooldown → favorability → scoring; the first gate that
/// fails decides the variant.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    Fired(Signal),
    CoolingDown { remaining: Duration },
    Unfavorable { volatility: f64, trend_strength: f64 },
    /// Favorable, but no rule scored (zero-total guard).
    NoScore,
}

impl TickOutcome {
    pub fn into_signal(self) -> Option<Signal> {
        match self {
            Self::Fired(signal) => Some(signal),
            _ => None,
        }
    }

    pub fn signal(&self) -> Option<&Signal> {
        match self {
            Self::Fired(signal) => Some(signal),
            _ => None,
        }
    }

    pub fn is_fired(&self) -> bool {
        matches!(self, Self::Fired(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Fired(_) => "fired",
            Self::CoolingDown { .. } => "cooling_down",
            Self::Unfavorable { .. } => "unfavorable",
            Self::NoScore => "no_score",
        }
    }
}
