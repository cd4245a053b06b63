//! Explicit engine parameters.
//!
//! Every threshold the components use arrives here from the caller.
//! Defaults live in the configuration layer; this type has none.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::combiner::CombineRules;
use crate::components::levels::SeparationRule;

/// A parameter outside its contract.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    #[error("moving-average window must be >= 1")]
    ZeroMaWindow,

    #[error("level separation must be a finite positive number, got {0}")]
    InvalidSeparation(f64),

    #[error("%K period must be >= 1")]
    ZeroKPeriod,

    #[error("%D period must be >= 1")]
    ZeroDPeriod,

    #[error("oversold threshold must lie in [0, 100], got {0}")]
    InvalidThreshold(f64),

    #[error("proximity must be a finite positive fraction, got {0}")]
    InvalidProximity(f64),
}

/// Stochastic oscillator settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KdParams {
    pub k_period: usize,
    pub d_period: usize,
    pub oversold_threshold: f64,
}

/// Which entry-timeframe detector feeds the combiner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerSource {
    Engulfing,
    KdCrossover,
    /// Engulfing first; the crossover only when no engulfing pattern matched.
    Either,
}

impl TriggerSource {
    pub fn uses_engulfing(&self) -> bool {
        matches!(self, TriggerSource::Engulfing | TriggerSource::Either)
    }

    pub fn uses_crossover(&self) -> bool {
        matches!(self, TriggerSource::KdCrossover | TriggerSource::Either)
    }
}

/// Full parameter set for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineParams {
    pub ma_window: usize,
    pub separation: SeparationRule,
    pub kd: KdParams,
    pub combine: CombineRules,
    pub trigger: TriggerSource,
}

impl EngineParams {
    pub fn validate(&self) -> Result<(), ParamError> {
        if self.ma_window == 0 {
            return Err(ParamError::ZeroMaWindow);
        }
        let separation = match self.separation {
            SeparationRule::Fixed { distance } => distance,
            SeparationRule::MeanRangeMultiple { multiple } => multiple,
        };
        if !(separation.is_finite() && separation > 0.0) {
            return Err(ParamError::InvalidSeparation(separation));
        }
        if self.kd.k_period == 0 {
            return Err(ParamError::ZeroKPeriod);
        }
        if self.kd.d_period == 0 {
            return Err(ParamError::ZeroDPeriod);
        }
        let threshold = self.kd.oversold_threshold;
        if !(0.0..=100.0).contains(&threshold) {
            return Err(ParamError::InvalidThreshold(threshold));
        }
        let proximity = self.combine.proximity_pct;
        if !(proximity.is_finite() && proximity > 0.0) {
            return Err(ParamError::InvalidProximity(proximity));
        }
        Ok(())
    }
}
