//! Signal engine: explicit parameters and the single-instrument pipeline.
//!
//! The structure series yields levels and trend; the entry series yields the
//! trigger; the combiner grades the confluence:
//!
//! 1. Validate parameters
//! 2. Structure: trend reading, level detection
//! 3. Entry: engulfing and/or %K/%D crossover
//! 4. Combine into a `Decision`

pub mod params;
pub mod pipeline;

pub use params::{EngineParams, KdParams, ParamError, TriggerSource};
pub use pipeline::{evaluate, EngineError, Evaluation};
