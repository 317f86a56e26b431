//! Sweep orchestration over the provider and store seams.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, Instrument};
use uuid::Uuid;

use crate::domain::{
    Experiment, NumericRange, ParameterSet, PromptLabError, ResponseVariant, Result, SweepRequest,
};
use crate::obs;
use crate::provider::{CompletionProvider, ProviderError};
use crate::reporting;
use crate::scoring;
use crate::store::ExperimentStore;

/// Bounds for `variants_per_combo`; out-of-range requests are clamped,
/// not rejected.
const VARIANTS_MIN: u32 = 1;
const VARIANTS_MAX: u32 = 4;

/// Bounds for `max_tokens`; out-of-range requests are clamped, not
/// rejected.
const TOKENS_MIN: u32 = 120;
const TOKENS_MAX: u32 = 800;

/// Default provider fan-out width.
const DEFAULT_CONCURRENCY: usize = 4;

/// One planned generation call: canonical grid position plus its
/// pre-assigned variant id.
struct PlannedCell {
    id: Uuid,
    parameters: ParameterSet,
}

/// Orchestrates parameter sweeps end to end: range expansion, bounded
/// provider fan-out, scoring, ranking, persistence.
pub struct ExperimentService {
    store: Arc<dyn ExperimentStore>,
    provider: Arc<dyn CompletionProvider>,
    concurrency: usize,
}

impl ExperimentService {
    pub fn new(store: Arc<dyn ExperimentStore>, provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            store,
            provider,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Override the provider fan-out width. Widths below 1 are raised
    /// to 1.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// All stored experiments, newest first.
    pub async fn list(&self) -> Result<Vec<Experiment>> {
        Ok(self.store.load_all().await?)
    }

    /// Fetch one experiment by id.
    pub async fn get(&self, id: Uuid) -> Result<Option<Experiment>> {
        let experiments = self.store.load_all().await?;
        Ok(experiments.into_iter().find(|e| e.id == id))
    }

    /// Run a full sweep for `request` and persist the result.
    ///
    /// The grid is walked in canonical order: temperature ascending,
    /// then top-p ascending, then variant index. Responses are ranked
    /// descending by overall score with ties keeping that order.
    /// Persistence is all-or-nothing: any provider failure aborts the
    /// sweep before the store is touched.
    pub async fn create(&self, request: SweepRequest) -> Result<Experiment> {
        if request.prompt.trim().is_empty() {
            return Err(PromptLabError::EmptyPrompt);
        }

        let temperatures = NumericRange::normalize(request.temperature_range)?.expand();
        let top_ps = NumericRange::normalize(request.top_p_range)?.expand();
        let variants_per_combo = request.variants_per_combo.clamp(VARIANTS_MIN, VARIANTS_MAX);
        let max_tokens = request.max_tokens.clamp(TOKENS_MIN, TOKENS_MAX);

        let experiment_id = Uuid::new_v4();
        let span = obs::sweep_span(experiment_id);

        self.run_sweep(
            experiment_id,
            &request.prompt,
            temperatures,
            top_ps,
            variants_per_combo,
            max_tokens,
        )
        .instrument(span)
        .await
    }

    /// Remove an experiment by id. Unknown ids are a no-op.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let mut experiments = self.store.load_all().await?;
        let before = experiments.len();
        experiments.retain(|e| e.id != id);
        let removed = experiments.len() < before;
        self.store.replace_all(&experiments).await?;
        obs::emit_experiment_deleted(id, removed);
        Ok(())
    }

    async fn run_sweep(
        &self,
        experiment_id: Uuid,
        prompt: &str,
        temperatures: Vec<f64>,
        top_ps: Vec<f64>,
        variants_per_combo: u32,
        max_tokens: u32,
    ) -> Result<Experiment> {
        let started = Instant::now();

        // Variant ids are assigned while planning, before any fan-out,
        // so concurrency cannot reorder or re-roll them.
        let mut plan =
            Vec::with_capacity(temperatures.len() * top_ps.len() * variants_per_combo as usize);
        for &temperature in &temperatures {
            for &top_p in &top_ps {
                let parameters = ParameterSet {
                    temperature,
                    top_p,
                    max_tokens,
                };
                for _ in 0..variants_per_combo {
                    plan.push(PlannedCell {
                        id: Uuid::new_v4(),
                        parameters,
                    });
                }
            }
        }

        obs::emit_sweep_started(experiment_id, plan.len(), variants_per_combo);

        // Bounded fan-out. `buffered` yields results in input order,
        // so the collected list is already canonical; the first
        // failure aborts the whole sweep before anything is persisted.
        let collected: Result<Vec<ResponseVariant>> = stream::iter(plan)
            .map(|cell| self.run_cell(prompt, cell))
            .buffered(self.concurrency)
            .try_collect()
            .await;
        let mut responses = match collected {
            Ok(responses) => responses,
            Err(err) => {
                obs::emit_sweep_failed(experiment_id, &err);
                return Err(err);
            }
        };

        // Stable sort: equal scores keep canonical generation order.
        responses.sort_by(|a, b| b.metrics.overall.total_cmp(&a.metrics.overall));

        let summary = reporting::experiment_summary(&responses);
        let best_overall = responses.first().map(|r| r.metrics.overall).unwrap_or(0.0);

        let experiment = Experiment {
            id: experiment_id,
            prompt: prompt.to_string(),
            created_at: Utc::now(),
            temperatures,
            top_ps,
            variants_per_combo,
            max_tokens,
            summary,
            responses,
        };

        // Newest first: prepend, then swap the whole collection.
        let mut experiments = self.store.load_all().await?;
        experiments.insert(0, experiment.clone());
        self.store.replace_all(&experiments).await?;

        obs::emit_sweep_finished(
            experiment_id,
            experiment.responses.len(),
            best_overall,
            started.elapsed().as_millis() as u64,
        );

        Ok(experiment)
    }

    /// Generate, score, and narrate one planned variant.
    async fn run_cell(&self, prompt: &str, cell: PlannedCell) -> Result<ResponseVariant> {
        let text = self.provider.generate(prompt, &cell.parameters).await?;
        if text.trim().is_empty() {
            return Err(ProviderError::EmptyCompletion.into());
        }
        let metrics = scoring::evaluate(prompt, &text);
        let analysis = reporting::analyze_response(&metrics, &cell.parameters);

        debug!(
            variant_id = %cell.id,
            temperature = cell.parameters.temperature,
            top_p = cell.parameters.top_p,
            overall = metrics.overall,
            "variant scored"
        );

        Ok(ResponseVariant {
            id: cell.id,
            parameters: cell.parameters,
            text,
            metrics,
            analysis,
        })
    }
}
