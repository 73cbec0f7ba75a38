use serde::{Deserialize, Serialize};

/// Direction of the short/long moving-average relationship.
///
/// `Flat` only exists before the first trend computation; once enough samples
/// arrive the direction is always `Up` or `Down`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrendDirection {
    Down,
    #[default]
    Flat,
    Up,
}

impl TrendDirection {
    /// -1, 0 or +1.
    pub fn sign(self) -> i8 {
        match self {
            Self::Down => -1,
            Self::Flat => 0,
            Self::Up => 1,
        }
    }
}
