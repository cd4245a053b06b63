//! Single-instrument evaluation: structure series → levels and trend, entry
//! series → trigger, then combination.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::components::combiner::{combine, is_near_any, nearby_levels};
use crate::components::levels::find_levels;
use crate::components::oscillator::detect_kd_crossover;
use crate::components::pattern::detect_engulfing_at_end;
use crate::components::trend::trend_reading;
use crate::domain::{
    CandleSeries, CrossoverResult, Decision, EntryTrigger, Level, PatternResult, SeriesError,
    TrendReading,
};

use super::params::{EngineParams, ParamError};

/// Errors from `evaluate`. Short series are never errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] SeriesError),

    #[error("invalid parameters: {0}")]
    InvalidParams(#[from] ParamError),
}

/// Everything one evaluation derived, for renderers and notifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Timestamp of the latest candle seen on either series.
    pub as_of: DateTime<Utc>,
    pub current_price: f64,
    pub trend: TrendReading,
    pub min_separation: f64,
    pub levels: Vec<Level>,
    pub nearby_levels: Vec<Level>,
    pub is_near_level: bool,
    pub pattern: Option<PatternResult>,
    pub crossover: Option<CrossoverResult>,
    pub trigger: Option<EntryTrigger>,
    pub decision: Decision,
}

/// Run the full pipeline for one instrument.
///
/// `current_price` is the last close of the structure series, which must not
/// be empty. The entry series may be empty or short; the trigger is then
/// simply absent.
pub fn evaluate(
    structure: &CandleSeries,
    entry: &CandleSeries,
    params: &EngineParams,
) -> Result<Evaluation, EngineError> {
    params.validate()?;
    let last = structure
        .last()
        .ok_or_else(|| SeriesError::Empty(structure.timeframe().to_string()))?;
    let current_price = last.close;
    let as_of = entry
        .last()
        .map_or(last.timestamp, |e| e.timestamp.max(last.timestamp));

    let structure_candles = structure.candles();
    let trend = trend_reading(structure_candles, params.ma_window);
    let min_separation = params.separation.resolve(structure_candles);
    let levels = find_levels(structure_candles, min_separation);
    debug!(
        timeframe = structure.timeframe(),
        candles = structure.len(),
        levels = levels.len(),
        trend = %trend.label,
        "structure series analysed"
    );

    let entry_candles = entry.candles();
    let pattern = if params.trigger.uses_engulfing() {
        detect_engulfing_at_end(entry_candles, trend.label)
    } else {
        None
    };
    let crossover = if params.trigger.uses_crossover() {
        detect_kd_crossover(
            entry_candles,
            params.kd.k_period,
            params.kd.d_period,
            params.kd.oversold_threshold,
        )
    } else {
        None
    };
    let trigger = pattern
        .map(EntryTrigger::from)
        .or_else(|| crossover.map(EntryTrigger::from));

    let nearby = nearby_levels(current_price, &levels);
    let is_near_level = is_near_any(current_price, &nearby, params.combine.proximity_pct);
    let decision = combine(
        current_price,
        &levels,
        trend.label,
        trigger.as_ref(),
        &params.combine,
    );
    debug!(
        timeframe = entry.timeframe(),
        current_price,
        is_near_level,
        trigger = ?trigger.map(|t| t.direction()),
        decision = %decision,
        "evaluation complete"
    );

    Ok(Evaluation {
        as_of,
        current_price,
        trend,
        min_separation,
        levels,
        nearby_levels: nearby,
        is_near_level,
        pattern,
        crossover,
        trigger,
        decision,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::combiner::CombineRules;
    use crate::components::levels::SeparationRule;
    use crate::domain::{Candle, Direction, TrendLabel};
    use crate::engine::params::{KdParams, TriggerSource};
    use chrono::{Duration, TimeZone};

    fn params(trigger: TriggerSource) -> EngineParams {
        EngineParams {
            ma_window: 5,
            separation: SeparationRule::Fixed { distance: 1.0 },
            kd: KdParams {
                k_period: 5,
                d_period: 3,
                oversold_threshold: 30.0,
            },
            combine: CombineRules {
                proximity_pct: 0.02,
                require_trend_alignment: false,
            },
            trigger,
        }
    }

    fn candle(hours: i64, open: f64, close: f64) -> Candle {
        Candle {
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap() + Duration::hours(hours),
            open,
            high: open.max(close) + 0.5,
            low: open.min(close) - 0.5,
            close,
            volume: 1.0,
        }
    }

    /// Daily structure with a support dip to 99.5 at index 2, last close 100.
    fn structure() -> CandleSeries {
        let bodies = [
            (104.0, 103.0),
            (103.0, 101.0),
            (101.0, 100.0),
            (100.5, 102.0),
            (102.0, 103.0),
            (103.0, 101.0),
            (101.0, 100.0),
        ];
        let candles = bodies
            .iter()
            .enumerate()
            .map(|(i, &(o, c))| candle(24 * i as i64, o, c))
            .collect();
        CandleSeries::new("1d", candles).unwrap()
    }

    fn bullish_engulfing_entry() -> CandleSeries {
        CandleSeries::new(
            "4h",
            vec![
                candle(200, 101.0, 100.5),
                candle(204, 100.0, 100.8),
                candle(208, 100.4, 99.6),
                candle(212, 99.2, 100.9),
            ],
        )
        .unwrap()
    }

    #[test]
    fn down_trend_blocks_bullish_engulfing_at_level() {
        let p = params(TriggerSource::Engulfing);
        let eval = evaluate(&structure(), &bullish_engulfing_entry(), &p).unwrap();
        assert_eq!(eval.current_price, 100.0);
        assert_eq!(eval.levels, vec![Level::support(2, 99.5)]);
        assert!(eval.is_near_level);
        assert_eq!(eval.trend.label, TrendLabel::Down);
        assert_eq!(eval.pattern, None);
        assert_eq!(eval.decision, Decision::WatchLevel);
    }

    #[test]
    fn indeterminate_trend_lets_bullish_engulfing_through() {
        let mut p = params(TriggerSource::Engulfing);
        p.ma_window = 50;
        let eval = evaluate(&structure(), &bullish_engulfing_entry(), &p).unwrap();
        assert_eq!(eval.trend.label, TrendLabel::Indeterminate);
        assert_eq!(eval.pattern.map(|p| p.direction), Some(Direction::Bullish));
        assert_eq!(eval.decision, Decision::StrongSignal(Direction::Bullish));
        assert_eq!(eval.as_of, bullish_engulfing_entry().last().unwrap().timestamp);
    }

    #[test]
    fn crossover_source_ignores_engulfing() {
        let mut p = params(TriggerSource::KdCrossover);
        p.ma_window = 50;
        let eval = evaluate(&structure(), &bullish_engulfing_entry(), &p).unwrap();
        assert_eq!(eval.pattern, None);
        // Four entry candles are far too few for k=5, d=3.
        assert_eq!(eval.crossover, None);
        assert_eq!(eval.decision, Decision::WatchLevel);
    }

    #[test]
    fn empty_entry_series_is_not_an_error() {
        let entry = CandleSeries::new("4h", Vec::new()).unwrap();
        let eval = evaluate(&structure(), &entry, &params(TriggerSource::Either)).unwrap();
        assert_eq!(eval.trigger, None);
        assert_eq!(eval.as_of, structure().last().unwrap().timestamp);
    }

    #[test]
    fn empty_structure_series_is_invalid_input() {
        let structure = CandleSeries::new("1d", Vec::new()).unwrap();
        let p = params(TriggerSource::Engulfing);
        let err = evaluate(&structure, &bullish_engulfing_entry(), &p).unwrap_err();
        assert_eq!(err, EngineError::InvalidInput(SeriesError::Empty("1d".into())));
    }

    #[test]
    fn invalid_params_are_rejected() {
        let mut p = params(TriggerSource::Engulfing);
        p.combine.proximity_pct = -0.1;
        let err = evaluate(&structure(), &bullish_engulfing_entry(), &p).unwrap_err();
        assert!(matches!(err, EngineError::InvalidParams(ParamError::InvalidProximity(_))));
    }

    #[test]
    fn evaluation_is_idempotent() {
        let p = params(TriggerSource::Either);
        let a = evaluate(&structure(), &bullish_engulfing_entry(), &p).unwrap();
        let b = evaluate(&structure(), &bullish_engulfing_entry(), &p).unwrap();
        assert_eq!(a, b);
    }
}
