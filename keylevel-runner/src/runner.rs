//! Evaluation runner. Wires configuration, the core pipeline and reporting.
//!
//! Two entry points:
//! - `evaluate_instrument()`: one instrument, one report.
//! - `evaluate_batch()`: many instruments, optionally on the rayon pool. The
//!   configuration is validated and hashed once; each instrument then gets its
//!   own `Result`, in input order.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use keylevel_core::components::levels::nearest_levels;
use keylevel_core::domain::CandleSeries;
use keylevel_core::engine::{evaluate, EngineError, EngineParams};

use crate::config::{ConfigError, SignalConfig};
use crate::fingerprint::{dataset_hash, ConfigHash, EvaluationId};
use crate::report::{SignalReport, SCHEMA_VERSION};

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("evaluation of '{symbol}' failed: {source}")]
    Engine {
        symbol: String,
        #[source]
        source: EngineError,
    },
}

/// One symbol's structure and entry series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    pub symbol: String,
    /// Slower series: levels and trend (e.g. daily).
    pub structure: CandleSeries,
    /// Faster series: entry trigger (e.g. 4h).
    pub entry: CandleSeries,
}

impl Instrument {
    pub fn new(symbol: impl Into<String>, structure: CandleSeries, entry: CandleSeries) -> Self {
        Self {
            symbol: symbol.into(),
            structure,
            entry,
        }
    }
}

/// Configuration resolved once for any number of instruments.
struct Prepared {
    params: EngineParams,
    config_hash: ConfigHash,
    chart_level_count: usize,
}

impl Prepared {
    fn new(config: &SignalConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            params: config.to_params(),
            config_hash: config.config_hash()?,
            chart_level_count: config.levels.chart_level_count,
        })
    }

    fn run(&self, instrument: &Instrument) -> Result<SignalReport, RunError> {
        let evaluation =
            evaluate(&instrument.structure, &instrument.entry, &self.params).map_err(|source| {
                RunError::Engine {
                    symbol: instrument.symbol.clone(),
                    source,
                }
            })?;

        let dataset_hash = dataset_hash(&[&instrument.structure, &instrument.entry]);
        let evaluation_id =
            EvaluationId::new(self.config_hash.clone(), dataset_hash.clone()).hash();
        let chart_levels = nearest_levels(
            &evaluation.levels,
            evaluation.current_price,
            self.chart_level_count,
        );
        let closest_level = evaluation.nearby_levels.first().copied();

        debug!(
            symbol = %instrument.symbol,
            decision = %evaluation.decision,
            evaluation_id = %evaluation_id,
            "instrument evaluated"
        );

        Ok(SignalReport {
            schema_version: SCHEMA_VERSION,
            symbol: instrument.symbol.clone(),
            structure_timeframe: instrument.structure.timeframe().to_string(),
            entry_timeframe: instrument.entry.timeframe().to_string(),
            config_hash: self.config_hash.clone(),
            dataset_hash,
            evaluation_id,
            evaluation,
            closest_level,
            chart_levels,
        })
    }
}

/// Evaluate one instrument under `config`.
pub fn evaluate_instrument(
    instrument: &Instrument,
    config: &SignalConfig,
) -> Result<SignalReport, RunError> {
    Prepared::new(config)?.run(instrument)
}

/// Evaluate every instrument under one configuration.
///
/// An invalid configuration fails the whole batch up front. After that, one
/// instrument failing does not affect the others.
pub fn evaluate_batch(
    instruments: &[Instrument],
    config: &SignalConfig,
    parallel: bool,
) -> Result<Vec<Result<SignalReport, RunError>>, ConfigError> {
    let prepared = Prepared::new(config)?;

    let results: Vec<Result<SignalReport, RunError>> = if parallel {
        instruments.par_iter().map(|i| prepared.run(i)).collect()
    } else {
        instruments.iter().map(|i| prepared.run(i)).collect()
    };

    let mut actionable = 0usize;
    let mut failed = 0usize;
    for result in &results {
        match result {
            Ok(report) if report.evaluation.decision.is_actionable() => actionable += 1,
            Ok(_) => {}
            Err(e) => {
                failed += 1;
                warn!(error = %e, "instrument skipped");
            }
        }
    }
    info!(
        instruments = instruments.len(),
        actionable,
        failed,
        config_hash = %prepared.config_hash,
        "batch evaluated"
    );

    Ok(results)
}
