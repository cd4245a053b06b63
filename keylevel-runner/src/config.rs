//! Signal configuration loaded from TOML.
//!
//! Every default lives here; the core engine receives explicit values only.
//!
//! ```toml
//! trigger = "engulfing"
//!
//! [trend]
//! ma_window = 50
//!
//! [levels]
//! separation = { rule = "mean_range_multiple", multiple = 2.0 }
//! chart_level_count = 5
//!
//! [oscillator]
//! k_period = 14
//! d_period = 3
//! oversold_threshold = 30.0
//!
//! [combiner]
//! proximity_pct = 0.02
//! require_trend_alignment = false
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use keylevel_core::components::combiner::CombineRules;
use keylevel_core::components::levels::SeparationRule;
use keylevel_core::engine::{EngineParams, KdParams, ParamError, TriggerSource};

use crate::fingerprint::ConfigHash;

/// Errors loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize config: {0}")]
    Serialize(String),

    #[error("invalid config: {0}")]
    Invalid(#[from] ParamError),
}

/// Complete signal configuration. Missing sections and fields take defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalConfig {
    /// Which entry detector feeds the combiner.
    pub trigger: TriggerSource,
    pub trend: TrendSection,
    pub levels: LevelSection,
    pub oscillator: OscillatorSection,
    pub combiner: CombinerSection,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            trigger: TriggerSource::Engulfing,
            trend: TrendSection::default(),
            levels: LevelSection::default(),
            oscillator: OscillatorSection::default(),
            combiner: CombinerSection::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendSection {
    /// Moving-average window on the structure timeframe.
    pub ma_window: usize,
}

impl Default for TrendSection {
    fn default() -> Self {
        Self { ma_window: 50 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelSection {
    /// How many levels, closest first, a chart overlay receives.
    pub chart_level_count: usize,
    pub separation: SeparationRule,
}

impl Default for LevelSection {
    fn default() -> Self {
        Self {
            chart_level_count: 5,
            separation: SeparationRule::MeanRangeMultiple { multiple: 2.0 },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OscillatorSection {
    pub k_period: usize,
    pub d_period: usize,
    pub oversold_threshold: f64,
}

impl Default for OscillatorSection {
    fn default() -> Self {
        Self {
            k_period: 14,
            d_period: 3,
            oversold_threshold: 30.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombinerSection {
    pub proximity_pct: f64,
    pub require_trend_alignment: bool,
}

impl Default for CombinerSection {
    fn default() -> Self {
        Self {
            proximity_pct: 0.02,
            require_trend_alignment: false,
        }
    }
}

impl SignalConfig {
    /// Load a configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse a configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Explicit engine parameters for this configuration.
    pub fn to_params(&self) -> EngineParams {
        EngineParams {
            ma_window: self.trend.ma_window,
            separation: self.levels.separation,
            kd: KdParams {
                k_period: self.oscillator.k_period,
                d_period: self.oscillator.d_period,
                oversold_threshold: self.oscillator.oversold_threshold,
            },
            combine: CombineRules {
                proximity_pct: self.combiner.proximity_pct,
                require_trend_alignment: self.combiner.require_trend_alignment,
            },
            trigger: self.trigger,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        Ok(self.to_params().validate()?)
    }

    /// BLAKE3 of the canonical JSON form.
    ///
    /// Field order is fixed by the struct layout, so equal configurations
    /// always hash equal.
    pub fn config_hash(&self) -> Result<ConfigHash, ConfigError> {
        let json = serde_json::to_vec(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        Ok(ConfigHash::from_bytes(&json))
    }
}
