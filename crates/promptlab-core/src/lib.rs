//! promptlab core library
//!
//! Grid sweeps of text-generation parameters with deterministic
//! response scoring and a ranked experiment history.
//!
//! - `domain`: ranges, parameter sets, metrics, experiments
//! - `scoring`: heuristic quality metrics for prompt/response pairs
//! - `reporting`: per-response analysis and experiment summaries
//! - `provider`: completion source seam plus the offline generator
//! - `store`: experiment persistence seam (JSON file, in-memory)
//! - `service`: the sweep orchestrator
//! - `obs` / `telemetry`: structured events and tracing setup

pub mod domain;
pub mod obs;
pub mod provider;
pub mod reporting;
pub mod scoring;
pub mod service;
pub mod store;
pub mod telemetry;

pub use domain::{
    Experiment, NumericRange, ParameterSet, PromptLabError, QualityMetrics, RangeError, RangeSpec,
    ResponseVariant, Result, SweepRequest,
};
pub use provider::{CompletionProvider, OfflineCompletionProvider, ProviderError};
pub use service::ExperimentService;
pub use store::{ExperimentStore, JsonExperimentStore, MemoryExperimentStore, StoreError};
pub use telemetry::init_tracing;

/// promptlab version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
