//! Signal components.
//!
//! Each component is a pure function of candle history and explicit
//! parameters:
//! - Level detector: fractal support/resistance with deduplication
//! - Trend classifier: last close against its moving average
//! - Pattern detector: engulfing on the last two entry candles
//! - Oscillator: %K/%D crossover at the latest point
//! - Combiner: grades the confluence into a decision
//!
//! Plus the indicator trait for precomputed numeric series.

pub mod combiner;
pub mod indicator;
pub mod levels;
pub mod oscillator;
pub mod pattern;
pub mod trend;

pub use combiner::{combine, is_near_any, nearby_levels, CombineRules, NEARBY_LEVEL_COUNT};
pub use indicator::Indicator;
pub use levels::{
    find_levels, is_resistance_fractal, is_support_fractal, nearest_levels, SeparationRule,
    MIN_LEVEL_CANDLES,
};
pub use oscillator::{crossover_between, detect_kd_crossover, oscillator_points};
pub use pattern::{detect_engulfing, detect_engulfing_at_end};
pub use trend::{classify_trend, trend_reading};
