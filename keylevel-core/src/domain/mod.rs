//! Domain types for the key-level signal engine

pub mod candle;
pub mod level;
pub mod series;
pub mod signal;

pub use candle::Candle;
pub use level::{Level, LevelKind};
pub use series::{mean_range, CandleSeries, OhlcvRow, SeriesError};
pub use signal::{
    CrossoverResult, Decision, Direction, EntryTrigger, OscillatorPoint, PatternResult,
    TrendLabel, TrendReading,
};
