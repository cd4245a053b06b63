//! Per-instrument signal reports and the alerts a notifier consumes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use keylevel_core::domain::{Decision, Direction, Level};
use keylevel_core::engine::Evaluation;

use crate::fingerprint::{ConfigHash, DatasetHash};
use crate::runner::RunError;

/// Current schema version for serialized reports.
pub const SCHEMA_VERSION: u32 = 1;

/// Everything a renderer needs for one instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalReport {
    /// Schema version for forward-compatible deserialization.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub symbol: String,
    pub structure_timeframe: String,
    pub entry_timeframe: String,
    pub config_hash: ConfigHash,
    pub dataset_hash: DatasetHash,
    pub evaluation_id: String,
    pub evaluation: Evaluation,
    /// Level nearest the current price, if any were found.
    pub closest_level: Option<Level>,
    /// Levels for the chart overlay, closest first.
    pub chart_levels: Vec<Level>,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// Signal strength carried by an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertStrength {
    Strong,
    Weak,
}

/// Notification payload for an actionable decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub symbol: String,
    pub strength: AlertStrength,
    pub direction: Direction,
    pub price: f64,
    pub closest_level: Option<f64>,
    pub as_of: DateTime<Utc>,
    pub evaluation_id: String,
    pub message: String,
}

impl SignalReport {
    pub fn decision(&self) -> Decision {
        self.evaluation.decision
    }

    /// Alert for StrongSignal/WeakSignal; `None` for anything else.
    pub fn alert(&self) -> Option<Alert> {
        let (strength, direction) = match self.evaluation.decision {
            Decision::StrongSignal(d) => (AlertStrength::Strong, d),
            Decision::WeakSignal(d) => (AlertStrength::Weak, d),
            Decision::WatchLevel | Decision::NoAction => return None,
        };
        let price = self.evaluation.current_price;
        let closest_level = self.closest_level.map(|l| l.price);
        let message = match closest_level {
            Some(level) => format!(
                "{}: {} at {price:.2} (closest level {level:.2})",
                self.symbol, self.evaluation.decision
            ),
            None => format!("{}: {} at {price:.2}", self.symbol, self.evaluation.decision),
        };
        Some(Alert {
            symbol: self.symbol.clone(),
            strength,
            direction,
            price,
            closest_level,
            as_of: self.evaluation.as_of,
            evaluation_id: self.evaluation_id.clone(),
            message,
        })
    }
}

/// Alerts from every successful report in a batch, in batch order.
pub fn collect_alerts(results: &[Result<SignalReport, RunError>]) -> Vec<Alert> {
    results
        .iter()
        .filter_map(|r| r.as_ref().ok())
        .filter_map(SignalReport::alert)
        .collect()
}
