//! Key-level detection: fractal extremes merged into a de-duplicated set.
//!
//! A support fractal at index i (2 ≤ i ≤ n−3):
//!   low[i] < low[i−1], low[i] < low[i+1], low[i] < low[i−2], low[i+1] < low[i+2]
//! A resistance fractal is the mirror on highs.
//!
//! The rule is asymmetric: i−2 is compared against the centre candle, while on
//! the right the i+1 → i+2 step must move away from the extreme. Equal values
//! never satisfy a strict comparison, so plateaus produce no fractal.

use serde::{Deserialize, Serialize};

use crate::domain::{mean_range, Candle, Level};

/// Fewest candles for which any index satisfies 2 ≤ i ≤ n−3.
pub const MIN_LEVEL_CANDLES: usize = 5;

/// How the merge distance between levels is derived.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum SeparationRule {
    /// A fixed price distance.
    Fixed { distance: f64 },
    /// A multiple of the series' mean high-low range.
    MeanRangeMultiple { multiple: f64 },
}

impl SeparationRule {
    /// Resolve to a concrete price distance for `candles`.
    pub fn resolve(&self, candles: &[Candle]) -> f64 {
        match *self {
            SeparationRule::Fixed { distance } => distance,
            SeparationRule::MeanRangeMultiple { multiple } => mean_range(candles) * multiple,
        }
    }
}

/// Support fractal test at `i`. False outside 2..=n−3.
pub fn is_support_fractal(candles: &[Candle], i: usize) -> bool {
    if !in_fractal_bounds(candles.len(), i) {
        return false;
    }
    let low = |j: usize| candles[j].low;
    low(i) < low(i - 1) && low(i) < low(i + 1) && low(i) < low(i - 2) && low(i + 1) < low(i + 2)
}

/// Resistance fractal test at `i`. False outside 2..=n−3.
pub fn is_resistance_fractal(candles: &[Candle], i: usize) -> bool {
    if !in_fractal_bounds(candles.len(), i) {
        return false;
    }
    let high = |j: usize| candles[j].high;
    high(i) > high(i - 1)
        && high(i) > high(i + 1)
        && high(i) > high(i - 2)
        && high(i + 1) > high(i + 2)
}

fn in_fractal_bounds(n: usize, i: usize) -> bool {
    i >= 2 && i + 2 < n
}

/// Scan `candles` in index order and return the accepted key levels.
///
/// Support is tested first at each index; resistance only when support fails.
/// A candidate is kept only if it sits at least `min_separation` away from
/// every level already kept, so the first level found in a price band wins.
/// Fewer than five candles yields no levels.
pub fn find_levels(candles: &[Candle], min_separation: f64) -> Vec<Level> {
    let n = candles.len();
    let mut levels: Vec<Level> = Vec::new();
    if n < MIN_LEVEL_CANDLES {
        return levels;
    }

    for i in 2..=(n - 3) {
        let candidate = if is_support_fractal(candles, i) {
            Level::support(i, candles[i].low)
        } else if is_resistance_fractal(candles, i) {
            Level::resistance(i, candles[i].high)
        } else {
            continue;
        };

        if is_far_from_existing(candidate.price, &levels, min_separation) {
            levels.push(candidate);
        }
    }

    levels
}

fn is_far_from_existing(price: f64, levels: &[Level], min_separation: f64) -> bool {
    levels.iter().all(|l| l.distance_to(price) >= min_separation)
}

/// Up to `count` levels ordered by distance to `price`, closest first.
///
/// Ties keep detection order.
pub fn nearest_levels(levels: &[Level], price: f64, count: usize) -> Vec<Level> {
    let mut sorted = levels.to_vec();
    sorted.sort_by(|a, b| a.distance_to(price).total_cmp(&b.distance_to(price)));
    sorted.truncate(count);
    sorted
}
