//! Keylevel Core: domain types, indicators, signal components, pipeline.
//!
//! This crate contains the multi-timeframe price-action engine:
//! - Domain types (candles, validated series, levels, decisions)
//! - Indicators behind a single `Indicator` trait (SMA, stochastic %K/%D)
//! - Fractal support/resistance detection with deduplication
//! - Trend classification, engulfing and %K/%D crossover triggers
//! - The signal combiner and the single-instrument `evaluate` pipeline
//!
//! Everything is synchronous and deterministic. Insufficient history yields an
//! absent or indeterminate result, never an error.

pub mod components;
pub mod domain;
pub mod engine;
pub mod indicators;

pub use components::CombineRules;
pub use domain::{
    Candle, CandleSeries, CrossoverResult, Decision, Direction, EntryTrigger, Level, LevelKind,
    PatternResult, SeriesError, TrendLabel, TrendReading,
};
pub use engine::{evaluate, EngineError, EngineParams, Evaluation, KdParams, TriggerSource};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: all public value types are Send + Sync.
    ///
    /// The runner evaluates instruments on a rayon pool; if any type fails
    /// this check, the build breaks here first.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        // Domain types
        require_send::<domain::Candle>();
        require_sync::<domain::Candle>();
        require_send::<domain::CandleSeries>();
        require_sync::<domain::CandleSeries>();
        require_send::<domain::Level>();
        require_sync::<domain::Level>();
        require_send::<domain::TrendReading>();
        require_sync::<domain::TrendReading>();
        require_send::<domain::EntryTrigger>();
        require_sync::<domain::EntryTrigger>();
        require_send::<domain::Decision>();
        require_sync::<domain::Decision>();

        // Engine types
        require_send::<engine::EngineParams>();
        require_sync::<engine::EngineParams>();
        require_send::<engine::Evaluation>();
        require_sync::<engine::Evaluation>();
        require_send::<engine::EngineError>();
        require_sync::<engine::EngineError>();

        // Indicators
        require_send::<indicators::Sma>();
        require_sync::<indicators::Sma>();
        require_send::<indicators::Stochastic>();
        require_sync::<indicators::Stochastic>();
    }

    /// Indicators are usable as trait objects.
    #[test]
    fn indicators_are_object_safe() {
        let boxed: Vec<Box<dyn components::Indicator>> = vec![
            Box::new(indicators::Sma::new(3)),
            Box::new(indicators::Stochastic::k(3)),
            Box::new(indicators::Stochastic::d(3, 2)),
        ];
        let names: Vec<&str> = boxed.iter().map(|i| i.name()).collect();
        assert_eq!(names, vec!["sma_3", "stoch_k_3", "stoch_d_3_2"]);
    }
}
