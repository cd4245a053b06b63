//! Signal value types produced by the detectors.
//!
//! All of these are plain values computed fresh per evaluation. None of them
//! refer back to the series they came from except by copy.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::candle::Candle;

/// Direction of a reversal or momentum signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Bullish,
    Bearish,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Bullish => write!(f, "bullish"),
            Direction::Bearish => write!(f, "bearish"),
        }
    }
}

/// Trend of the structure series relative to its moving average.
///
/// `Indeterminate` means the series is shorter than the MA window. It is a
/// neutral regime, not an error: pattern detection evaluates both branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrendLabel {
    Up,
    Down,
    Indeterminate,
}

impl TrendLabel {
    /// Whether a signal in `direction` agrees with this trend.
    /// `Indeterminate` agrees with both directions.
    pub fn permits(&self, direction: Direction) -> bool {
        !matches!(
            (self, direction),
            (TrendLabel::Up, Direction::Bearish) | (TrendLabel::Down, Direction::Bullish)
        )
    }
}

impl fmt::Display for TrendLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendLabel::Up => write!(f, "up"),
            TrendLabel::Down => write!(f, "down"),
            TrendLabel::Indeterminate => write!(f, "indeterminate"),
        }
    }
}

/// Trend label together with the moving average it was judged against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendReading {
    pub label: TrendLabel,
    /// `None` when the label is `Indeterminate`.
    pub moving_average: Option<f64>,
}

/// An engulfing pattern on the two most recent entry candles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatternResult {
    pub direction: Direction,
    pub prev: Candle,
    pub curr: Candle,
}

/// One fully-defined point of the stochastic oscillator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OscillatorPoint {
    pub k: f64,
    pub d: f64,
}

/// A %K/%D crossover at the boundary between the two latest points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrossoverResult {
    pub direction: Direction,
    pub is_oversold: bool,
    pub prev: OscillatorPoint,
    pub curr: OscillatorPoint,
}

/// Whichever entry-timeframe trigger the combiner is fed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EntryTrigger {
    Engulfing(PatternResult),
    Crossover(CrossoverResult),
}

impl EntryTrigger {
    pub fn direction(&self) -> Direction {
        match self {
            EntryTrigger::Engulfing(p) => p.direction,
            EntryTrigger::Crossover(c) => c.direction,
        }
    }
}

impl From<PatternResult> for EntryTrigger {
    fn from(pattern: PatternResult) -> Self {
        EntryTrigger::Engulfing(pattern)
    }
}

impl From<CrossoverResult> for EntryTrigger {
    fn from(crossover: CrossoverResult) -> Self {
        EntryTrigger::Crossover(crossover)
    }
}

/// Graded outcome of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    NoAction,
    /// Price sits at a key level; no entry trigger yet.
    WatchLevel,
    /// Entry trigger without structural confluence.
    WeakSignal(Direction),
    /// Entry trigger at a key level.
    StrongSignal(Direction),
}

impl Decision {
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Decision::WeakSignal(d) | Decision::StrongSignal(d) => Some(*d),
            Decision::NoAction | Decision::WatchLevel => None,
        }
    }

    /// True for the two signal grades a notifier should act on.
    pub fn is_actionable(&self) -> bool {
        self.direction().is_some()
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::NoAction => write!(f, "no action"),
            Decision::WatchLevel => write!(f, "watch level"),
            Decision::WeakSignal(d) => write!(f, "weak {d} signal"),
            Decision::StrongSignal(d) => write!(f, "strong {d} signal"),
        }
    }
}
