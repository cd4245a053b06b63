//! Indicator trait.
//!
//! Indicators are pure functions: candle history in, numeric series out.

use crate::domain::Candle;

/// Trait for indicators.
///
/// Indicators take a full candle series and produce a numeric output series of
/// the same length. The first `lookback()` values should be `f64::NAN` (warmup).
///
/// # Look-ahead contamination guard
/// No indicator value at candle t may depend on price data from candle t+1 or
/// later. Every indicator must pass the truncated-vs-full series test.
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g., "sma_50", "stoch_k_14").
    fn name(&self) -> &str;

    /// Number of candles needed before the indicator produces valid output.
    fn lookback(&self) -> usize;

    /// Compute the indicator for the entire candle series.
    ///
    /// Returns a `Vec<f64>` of the same length as `candles`.
    /// The first `lookback()` values should be `f64::NAN`.
    fn compute(&self, candles: &[Candle]) -> Vec<f64>;

    /// Value at the last candle, if defined.
    fn latest(&self, candles: &[Candle]) -> Option<f64> {
        self.compute(candles)
            .last()
            .copied()
            .filter(|v| !v.is_nan())
    }
}
