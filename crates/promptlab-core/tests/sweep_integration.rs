//! Integration tests for the sweep flow over the JSON file store.

use std::path::Path;
use std::sync::Arc;

use promptlab_core::{
    ExperimentService, ExperimentStore, JsonExperimentStore, OfflineCompletionProvider, RangeSpec,
    SweepRequest,
};

fn grid_request(prompt: &str) -> SweepRequest {
    SweepRequest {
        prompt: prompt.to_string(),
        temperature_range: RangeSpec::new(0.2, 0.8, 0.3),
        top_p_range: RangeSpec::new(0.7, 1.0, 0.15),
        variants_per_combo: 2,
        max_tokens: 400,
    }
}

fn service_at(dir: &Path, seed: u64) -> ExperimentService {
    let store = Arc::new(JsonExperimentStore::new(dir));
    let provider = Arc::new(OfflineCompletionProvider::new(seed));
    ExperimentService::new(store, provider)
}

#[tokio::test]
async fn full_sweep_lifecycle_over_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_at(dir.path(), 7);

    let experiment = service
        .create(grid_request("Draft a rollout plan for the new cache layer"))
        .await
        .expect("sweep should succeed");
    assert_eq!(experiment.responses.len(), 18);
    assert!(experiment.summary.starts_with("Best overall score"));

    let listed = service.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, experiment.id);

    let fetched = service.get(experiment.id).await.unwrap();
    assert_eq!(fetched.map(|e| e.id), Some(experiment.id));

    service.delete(experiment.id).await.unwrap();
    assert!(service.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn experiments_survive_store_reopen() {
    let dir = tempfile::tempdir().unwrap();

    let experiment = {
        let service = service_at(dir.path(), 3);
        service
            .create(grid_request("Summarize the incident review for stakeholders"))
            .await
            .unwrap()
    };

    // A fresh store over the same directory sees the persisted sweep,
    // bit-for-bit.
    let reopened = service_at(dir.path(), 3);
    let listed = reopened.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], experiment);
}

#[tokio::test]
async fn sweeps_accumulate_newest_first_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_at(dir.path(), 1);

    service
        .create(grid_request("First prompt under test"))
        .await
        .unwrap();
    let second = service
        .create(grid_request("Second prompt under test"))
        .await
        .unwrap();

    let listed = service.list().await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, second.id);

    // The raw file is a JSON array and parses standalone.
    let store = JsonExperimentStore::new(dir.path());
    let raw = std::fs::read_to_string(store.store_path()).unwrap();
    assert!(raw.trim_start().starts_with('['));
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed.as_array().map(|a| a.len()), Some(2));
}

#[tokio::test]
async fn failed_sweep_leaves_store_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_at(dir.path(), 2);

    let mut request = grid_request("Will not survive validation");
    request.temperature_range = RangeSpec::new(0.9, 0.1, 0.1);
    assert!(service.create(request).await.is_err());

    // Nothing was generated, so nothing was written.
    let store = JsonExperimentStore::new(dir.path());
    assert!(store.load_all().await.unwrap().is_empty());
}
