//! Domain models for promptlab.
//!
//! Canonical definitions for the core entities:
//! - `RangeSpec` / `NumericRange`: scan-range specification and expansion
//! - `ParameterSet`: one grid cell's generation parameters
//! - `QualityMetrics` / `ResponseVariant`: scored responses
//! - `Experiment`: one completed, ranked sweep
//! - `SweepRequest`: the input payload for creating a sweep

pub mod error;
pub mod experiment;
pub mod range;

pub use error::{PromptLabError, RangeError, Result};
pub use experiment::{Experiment, ParameterSet, QualityMetrics, ResponseVariant, SweepRequest};
pub use range::{NumericRange, RangeSpec};
