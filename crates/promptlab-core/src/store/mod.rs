//! Experiment persistence seam.

pub mod json;
pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::Experiment;

pub use json::JsonExperimentStore;
pub use memory::MemoryExperimentStore;

/// Errors from experiment storage.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Ordered collection of experiments.
///
/// Contract:
/// - `load_all` bootstraps an empty collection on first use.
/// - `replace_all` swaps the whole collection in one step; readers
///   never observe a partially written list.
/// - Ordering is owned by callers; the store preserves whatever order
///   it is handed.
#[async_trait]
pub trait ExperimentStore: Send + Sync {
    /// Load the full collection in stored order.
    async fn load_all(&self) -> StoreResult<Vec<Experiment>>;

    /// Replace the full collection.
    async fn replace_all(&self, experiments: &[Experiment]) -> StoreResult<()>;
}
