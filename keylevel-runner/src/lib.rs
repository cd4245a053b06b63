//! Keylevel Runner: configuration, reports, fingerprints, batch evaluation.
//!
//! This crate builds on `keylevel-core` to provide:
//! - TOML signal configuration with documented defaults
//! - Per-instrument signal reports with deterministic identity hashes
//! - Parallel batch evaluation over many instruments
//! - Alert extraction for an external notifier

pub mod config;
pub mod fingerprint;
pub mod report;
pub mod runner;

pub use config::{
    CombinerSection, ConfigError, LevelSection, OscillatorSection, SignalConfig, TrendSection,
};
pub use fingerprint::{dataset_hash, ConfigHash, DatasetHash, EvaluationId};
pub use report::{collect_alerts, Alert, AlertStrength, SignalReport, SCHEMA_VERSION};
pub use runner::{evaluate_batch, evaluate_instrument, Instrument, RunError};
