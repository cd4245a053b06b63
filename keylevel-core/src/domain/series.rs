//! Candle series: a validated, time-ordered run of candles on one timeframe.
//!
//! This is the only place input data is checked. Everything downstream takes
//! `&[Candle]` and assumes finite, sane, strictly time-ordered values.

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::candle::Candle;

/// Contract violations in caller-supplied candle data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    #[error("series '{0}' is empty")]
    Empty(String),

    #[error("timestamp at index {index} does not strictly follow its predecessor")]
    NonMonotonicTimestamp { index: usize },

    #[error("non-finite {field} at index {index}")]
    NonFinite { index: usize, field: &'static str },

    #[error("high/low do not bracket open/close at index {index}")]
    InconsistentRange { index: usize },

    #[error("non-positive price or negative volume at index {index}")]
    NonPositivePrice { index: usize },

    #[error("timestamp {millis}ms at index {index} is out of range")]
    InvalidTimestamp { index: usize, millis: i64 },
}

/// Provider-style OHLCV row: `(epoch_millis, open, high, low, close, volume)`.
pub type OhlcvRow = (i64, f64, f64, f64, f64, f64);

/// Ordered candles sharing one timeframe (e.g. "1d" structure, "4h" entry).
///
/// Construction validates every candle and the timestamp order. An empty
/// series is allowed here; operations that need a current price reject it.
/// Deserialization goes through the same checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCandleSeries")]
pub struct CandleSeries {
    timeframe: String,
    candles: Vec<Candle>,
}

/// Unchecked wire form of `CandleSeries`.
#[derive(Deserialize)]
struct RawCandleSeries {
    timeframe: String,
    candles: Vec<Candle>,
}

impl TryFrom<RawCandleSeries> for CandleSeries {
    type Error = SeriesError;

    fn try_from(raw: RawCandleSeries) -> Result<Self, Self::Error> {
        Self::new(raw.timeframe, raw.candles)
    }
}

impl CandleSeries {
    pub fn new(timeframe: impl Into<String>, candles: Vec<Candle>) -> Result<Self, SeriesError> {
        validate_candles(&candles)?;
        Ok(Self {
            timeframe: timeframe.into(),
            candles,
        })
    }

    /// Build a series from raw provider rows, converting epoch milliseconds.
    pub fn from_ohlcv_rows(
        timeframe: impl Into<String>,
        rows: &[OhlcvRow],
    ) -> Result<Self, SeriesError> {
        let candles = rows
            .iter()
            .enumerate()
            .map(|(index, &(millis, open, high, low, close, volume))| {
                let timestamp = DateTime::from_timestamp_millis(millis)
                    .ok_or(SeriesError::InvalidTimestamp { index, millis })?;
                Ok(Candle {
                    timestamp,
                    open,
                    high,
                    low,
                    close,
                    volume,
                })
            })
            .collect::<Result<Vec<_>, SeriesError>>()?;
        Self::new(timeframe, candles)
    }

    pub fn timeframe(&self) -> &str {
        &self.timeframe
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }

    /// Mean high-low range. Zero for an empty series.
    pub fn mean_range(&self) -> f64 {
        mean_range(&self.candles)
    }
}

/// Mean high-low range of a candle slice. Zero for an empty slice.
pub fn mean_range(candles: &[Candle]) -> f64 {
    if candles.is_empty() {
        return 0.0;
    }
    candles.iter().map(Candle::range).sum::<f64>() / candles.len() as f64
}

fn validate_candles(candles: &[Candle]) -> Result<(), SeriesError> {
    for (index, candle) in candles.iter().enumerate() {
        if let Some(field) = first_non_finite(candle) {
            return Err(SeriesError::NonFinite { index, field });
        }
        if candle.low <= 0.0 || candle.volume < 0.0 {
            return Err(SeriesError::NonPositivePrice { index });
        }
        if !candle.is_sane() {
            return Err(SeriesError::InconsistentRange { index });
        }
        if index > 0 && candle.timestamp <= candles[index - 1].timestamp {
            return Err(SeriesError::NonMonotonicTimestamp { index });
        }
    }
    Ok(())
}

fn first_non_finite(candle: &Candle) -> Option<&'static str> {
    [
        ("open", candle.open),
        ("high", candle.high),
        ("low", candle.low),
        ("close", candle.close),
        ("volume", candle.volume),
    ]
    .into_iter()
    .find(|(_, v)| !v.is_finite())
    .map(|(name, _)| name)
}
