//! Plain-language narration for scored responses and experiments.
//!
//! Templates are deterministic: identical metrics and parameters
//! always render identical text, so narration can be asserted on in
//! tests and diffed across runs.

use crate::domain::{ParameterSet, QualityMetrics, ResponseVariant};

/// Structure score above which a response reads as structured.
const STRUCTURED_THRESHOLD: f64 = 0.7;

/// Temperature above which the tone reads as imaginative.
const IMAGINATIVE_THRESHOLD: f64 = 0.6;

/// One-sentence analysis of a single scored response.
pub fn analyze_response(metrics: &QualityMetrics, params: &ParameterSet) -> String {
    let mode = if metrics.structure > STRUCTURED_THRESHOLD {
        "structured"
    } else {
        "narrative"
    };
    let tone = if params.temperature > IMAGINATIVE_THRESHOLD {
        "imaginative"
    } else {
        "precise"
    };
    format!(
        "Balances {tone} reasoning with {mode} formatting. Coverage {:.0}% and vocab richness {:.0}%.",
        (metrics.coverage * 100.0).round(),
        (metrics.richness * 100.0).round(),
    )
}

/// Experiment-level summary over the ranked response list.
///
/// Expects `responses` already sorted descending by `overall`; the
/// first element is reported as the best.
pub fn experiment_summary(responses: &[ResponseVariant]) -> String {
    if responses.is_empty() {
        return "No responses generated".to_string();
    }

    let top = &responses[0];
    let average = responses
        .iter()
        .map(|variant| variant.metrics.overall)
        .sum::<f64>()
        / responses.len() as f64;

    format!(
        "Best overall score {:.1}% using T={:.2}, top_p={:.2}. Average quality {:.1}%.",
        top.metrics.overall * 100.0,
        top.parameters.temperature,
        top.parameters.top_p,
        average * 100.0,
    )
}
