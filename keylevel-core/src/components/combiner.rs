//! Signal combination. Merges level proximity, the entry trigger and trend
//! into one graded decision.
//!
//! Priority, first match wins:
//! 1. trigger and near a level → StrongSignal(direction)
//! 2. trigger only             → WeakSignal(direction)
//! 3. near a level only        → WatchLevel
//! 4. otherwise                → NoAction

use serde::{Deserialize, Serialize};

use crate::components::levels::nearest_levels;
use crate::domain::{Decision, EntryTrigger, Level, TrendLabel};

/// How many of the closest levels count for proximity.
pub const NEARBY_LEVEL_COUNT: usize = 2;

/// Caller-supplied combination parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombineRules {
    /// Relative distance (fraction of current price) under which price is
    /// "at" a level, e.g. 0.02.
    pub proximity_pct: f64,
    /// Drop a trigger whose direction opposes a decisive trend.
    pub require_trend_alignment: bool,
}

/// The levels that count as "nearby": the two closest to `current_price`.
pub fn nearby_levels(current_price: f64, levels: &[Level]) -> Vec<Level> {
    nearest_levels(levels, current_price, NEARBY_LEVEL_COUNT)
}

/// True iff `current_price` is within `proximity_pct` (relative, strict) of
/// any of `nearby`.
pub fn is_near_any(current_price: f64, nearby: &[Level], proximity_pct: f64) -> bool {
    nearby
        .iter()
        .any(|level| level.distance_to(current_price) / current_price < proximity_pct)
}

/// Combine the component outputs into a decision.
pub fn combine(
    current_price: f64,
    levels: &[Level],
    trend: TrendLabel,
    trigger: Option<&EntryTrigger>,
    rules: &CombineRules,
) -> Decision {
    let nearby = nearby_levels(current_price, levels);
    let near_level = is_near_any(current_price, &nearby, rules.proximity_pct);
    let direction = trigger
        .map(EntryTrigger::direction)
        .filter(|d| !rules.require_trend_alignment || trend.permits(*d));

    match (direction, near_level) {
        (Some(d), true) => Decision::StrongSignal(d),
        (Some(d), false) => Decision::WeakSignal(d),
        (None, true) => Decision::WatchLevel,
        (None, false) => Decision::NoAction,
    }
}
