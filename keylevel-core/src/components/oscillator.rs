//! Stochastic %K/%D crossover detection.
//!
//! Only the boundary between the two latest points is inspected; earlier
//! crossovers are history and are never reported.

use crate::domain::{Candle, CrossoverResult, Direction, OscillatorPoint};
use crate::indicators::stochastic::stochastic_lines;

/// All points where both %K and %D are defined, oldest first.
pub fn oscillator_points(candles: &[Candle], k_period: usize, d_period: usize) -> Vec<OscillatorPoint> {
    let (k, d) = stochastic_lines(candles, k_period, d_period);
    k.into_iter()
        .zip(d)
        .filter(|(k, d)| !k.is_nan() && !d.is_nan())
        .map(|(k, d)| OscillatorPoint { k, d })
        .collect()
}

/// Two-point crossover rule.
///
/// Bullish iff %K was strictly below %D at `prev` and is at or above %D at
/// `curr`. `is_oversold` iff the current %K is strictly below `threshold`.
pub fn crossover_between(
    prev: OscillatorPoint,
    curr: OscillatorPoint,
    threshold: f64,
) -> Option<CrossoverResult> {
    if prev.k < prev.d && curr.k >= curr.d {
        return Some(CrossoverResult {
            direction: Direction::Bullish,
            is_oversold: curr.k < threshold,
            prev,
            curr,
        });
    }
    None
}

/// Bullish %K/%D crossover at the latest candle of `candles`.
///
/// `None` when fewer than `d_period + 2` %K values exist, or when the two
/// latest points do not cross.
pub fn detect_kd_crossover(
    candles: &[Candle],
    k_period: usize,
    d_period: usize,
    threshold: f64,
) -> Option<CrossoverResult> {
    let k_points = (candles.len() + 1).saturating_sub(k_period.max(1));
    if k_points < d_period + 2 {
        return None;
    }

    match oscillator_points(candles, k_period, d_period).as_slice() {
        [.., prev, curr] => crossover_between(*prev, *curr, threshold),
        _ => None,
    }
}
