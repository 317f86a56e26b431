//! In-memory experiment store for tests and examples.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::Experiment;

use super::{ExperimentStore, StoreResult};

/// Mutex-guarded in-memory collection. Mirrors the contract of the
/// file-backed store without touching disk.
#[derive(Debug, Default)]
pub struct MemoryExperimentStore {
    experiments: Mutex<Vec<Experiment>>,
}

impl MemoryExperimentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored experiments.
    pub fn len(&self) -> usize {
        self.experiments.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ExperimentStore for MemoryExperimentStore {
    async fn load_all(&self) -> StoreResult<Vec<Experiment>> {
        Ok(self.experiments.lock().unwrap().clone())
    }

    async fn replace_all(&self, experiments: &[Experiment]) -> StoreResult<()> {
        *self.experiments.lock().unwrap() = experiments.to_vec();
        Ok(())
    }
}
