//! Key levels: derived support/resistance facts about one series snapshot.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of price a level was formed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LevelKind {
    Support,
    Resistance,
}

impl fmt::Display for LevelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelKind::Support => write!(f, "support"),
            LevelKind::Resistance => write!(f, "resistance"),
        }
    }
}

/// A structural price level found on the structure series.
///
/// `index` is the candle position in the series the level was computed from;
/// it has no meaning against any other snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub index: usize,
    pub price: f64,
    pub kind: LevelKind,
}

impl Level {
    pub fn support(index: usize, price: f64) -> Self {
        Self {
            index,
            price,
            kind: LevelKind::Support,
        }
    }

    pub fn resistance(index: usize, price: f64) -> Self {
        Self {
            index,
            price,
            kind: LevelKind::Resistance,
        }
    }

    /// Absolute distance from `price` to this level.
    pub fn distance_to(&self, price: f64) -> f64 {
        (self.price - price).abs()
    }
}
