//! JSON-file experiment store.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tempfile::NamedTempFile;

use crate::domain::Experiment;

use super::{ExperimentStore, StoreResult};

const STORE_FILE: &str = "experiments.json";

/// Filesystem store holding the whole collection in one
/// pretty-printed `experiments.json`.
///
/// Writes land in a temp file inside the data directory and are
/// renamed into place, so a crash mid-write leaves the previous
/// contents intact.
pub struct JsonExperimentStore {
    data_dir: PathBuf,
}

impl JsonExperimentStore {
    /// Store rooted at `data_dir`. The directory and file are created
    /// lazily on first use.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE)
    }

    /// Create the data directory and an empty collection file if
    /// either is missing.
    fn ensure_file(&self) -> StoreResult<PathBuf> {
        let path = self.store_path();
        if !path.exists() {
            fs::create_dir_all(&self.data_dir)?;
            fs::write(&path, "[]")?;
        }
        Ok(path)
    }
}

#[async_trait]
impl ExperimentStore for JsonExperimentStore {
    async fn load_all(&self) -> StoreResult<Vec<Experiment>> {
        let path = self.ensure_file()?;
        let raw = fs::read_to_string(&path)?;
        let experiments = serde_json::from_str(&raw)?;
        Ok(experiments)
    }

    async fn replace_all(&self, experiments: &[Experiment]) -> StoreResult<()> {
        fs::create_dir_all(&self.data_dir)?;
        let json = serde_json::to_vec_pretty(experiments)?;

        // Write to a sibling temp file, then rename over the store
        // file. Rename within one directory is atomic on POSIX.
        let mut tmp = NamedTempFile::new_in(&self.data_dir)?;
        tmp.write_all(&json)?;
        tmp.persist(self.store_path()).map_err(|e| e.error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Experiment;
    use crate::store::StoreError;
    use chrono::Utc;
    use uuid::Uuid;

    fn sample_experiment(prompt: &str) -> Experiment {
        Experiment {
            id: Uuid::new_v4(),
            prompt: prompt.to_string(),
            created_at: Utc::now(),
            temperatures: vec![0.2, 0.5],
            top_ps: vec![0.9],
            variants_per_combo: 1,
            max_tokens: 400,
            summary: "No responses generated".to_string(),
            responses: Vec::new(),
        }
    }

    #[tokio::test]
    async fn first_load_bootstraps_empty_collection() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonExperimentStore::new(dir.path().join("lab"));

        let experiments = store.load_all().await.unwrap();
        assert!(experiments.is_empty());
        assert_eq!(fs::read_to_string(store.store_path()).unwrap(), "[]");
    }

    #[tokio::test]
    async fn replace_then_load_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonExperimentStore::new(dir.path());

        let experiments = vec![sample_experiment("first"), sample_experiment("second")];
        store.replace_all(&experiments).await.unwrap();

        let loaded = store.load_all().await.unwrap();
        assert_eq!(loaded, experiments);
    }

    #[tokio::test]
    async fn replace_overwrites_previous_collection() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonExperimentStore::new(dir.path());

        store
            .replace_all(&[sample_experiment("a"), sample_experiment("b")])
            .await
            .unwrap();
        let fewer = vec![sample_experiment("c")];
        store.replace_all(&fewer).await.unwrap();

        let loaded = store.load_all().await.unwrap();
        assert_eq!(loaded, fewer);
    }

    #[tokio::test]
    async fn collection_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let experiments = vec![sample_experiment("durable")];

        {
            let store = JsonExperimentStore::new(dir.path());
            store.replace_all(&experiments).await.unwrap();
        }

        let reopened = JsonExperimentStore::new(dir.path());
        assert_eq!(reopened.load_all().await.unwrap(), experiments);
    }

    #[tokio::test]
    async fn corrupt_file_surfaces_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonExperimentStore::new(dir.path());
        fs::write(store.store_path(), "not json").unwrap();

        let result = store.load_all().await;
        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }
}
