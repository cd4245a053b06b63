//! Deterministic identification of evaluations.
//!
//! - `ConfigHash`: BLAKE3 of the canonical configuration JSON.
//! - `DatasetHash`: BLAKE3 over the candle content of the input series.
//! - `EvaluationId`: config hash + dataset hash; equal ids mean the same
//!   evaluation result.

use std::fmt;

use serde::{Deserialize, Serialize};

use keylevel_core::domain::CandleSeries;

/// Hash of a signal configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConfigHash(pub String);

impl ConfigHash {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(blake3::hash(bytes).to_hex().to_string())
    }
}

impl fmt::Display for ConfigHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Content hash of the candle data an evaluation saw.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatasetHash(pub String);

impl fmt::Display for DatasetHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hash every candle of every series, in the order given.
///
/// The timeframe label and the candle count are part of the hash, so moving a
/// candle from one series to the next changes the result.
pub fn dataset_hash(series: &[&CandleSeries]) -> DatasetHash {
    let mut hasher = blake3::Hasher::new();
    for s in series {
        hasher.update(s.timeframe().as_bytes());
        hasher.update(&(s.len() as u64).to_le_bytes());
        for candle in s.candles() {
            hasher.update(&candle.timestamp.timestamp_millis().to_le_bytes());
            hasher.update(&candle.open.to_le_bytes());
            hasher.update(&candle.high.to_le_bytes());
            hasher.update(&candle.low.to_le_bytes());
            hasher.update(&candle.close.to_le_bytes());
            hasher.update(&candle.volume.to_le_bytes());
        }
    }
    DatasetHash(hasher.finalize().to_hex().to_string())
}

/// Identity of one evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EvaluationId {
    pub config_hash: ConfigHash,
    pub dataset_hash: DatasetHash,
}

impl EvaluationId {
    pub fn new(config_hash: ConfigHash, dataset_hash: DatasetHash) -> Self {
        Self {
            config_hash,
            dataset_hash,
        }
    }

    /// BLAKE3 of the canonical `{config_hash, dataset_hash}` JSON.
    pub fn hash(&self) -> String {
        let canonical = serde_json::json!({
            "config_hash": &self.config_hash.0,
            "dataset_hash": &self.dataset_hash.0,
        });
        blake3::hash(canonical.to_string().as_bytes())
            .to_hex()
            .to_string()
    }
}
