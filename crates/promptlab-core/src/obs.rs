//! Structured observability for the sweep lifecycle.
//!
//! Events carry a stable `event` field plus the experiment id, so log
//! pipelines can filter on either without parsing message text.

use tracing::{debug, info, warn, Span};
use uuid::Uuid;

use crate::domain::PromptLabError;

/// Span covering one sweep from planning through persistence. Attach
/// it to the sweep future with `tracing::Instrument`.
pub fn sweep_span(experiment_id: Uuid) -> Span {
    tracing::info_span!("promptlab.sweep", experiment_id = %experiment_id)
}

/// Emit event: sweep accepted, fan-out about to start.
pub fn emit_sweep_started(experiment_id: Uuid, planned_calls: usize, variants_per_combo: u32) {
    info!(
        event = "sweep.started",
        experiment_id = %experiment_id,
        planned_calls = planned_calls,
        variants_per_combo = variants_per_combo,
    );
}

/// Emit event: sweep ranked and persisted.
pub fn emit_sweep_finished(
    experiment_id: Uuid,
    responses: usize,
    best_overall: f64,
    duration_ms: u64,
) {
    info!(
        event = "sweep.finished",
        experiment_id = %experiment_id,
        responses = responses,
        best_overall = best_overall,
        duration_ms = duration_ms,
    );
}

/// Emit event: sweep aborted before anything was persisted.
pub fn emit_sweep_failed(experiment_id: Uuid, error: &PromptLabError) {
    warn!(
        event = "sweep.failed",
        experiment_id = %experiment_id,
        error = %error,
    );
}

/// Emit event: experiment removed, or a no-op when the id was unknown.
pub fn emit_experiment_deleted(experiment_id: Uuid, removed: bool) {
    if removed {
        info!(event = "experiment.deleted", experiment_id = %experiment_id);
    } else {
        debug!(event = "experiment.delete_noop", experiment_id = %experiment_id);
    }
}
