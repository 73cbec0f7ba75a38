//! Domain types for TickScore.

pub mod signal;
pub mod snapshot;
pub mod trend;

pub use signal::{Signal, SignalDirection};
pub use snapshot::{MarketSnapshot, SnapshotError};
pub use trend::TrendDirection;

/// Trading pair identifier (e.g., "EUR/GBP OTC").
pub type Pair = String;
