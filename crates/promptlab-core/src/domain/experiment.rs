//! Experiment entities: parameter grids, scored variants, completed sweeps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::range::RangeSpec;

/// Generation parameters for one grid cell.
///
/// Built once per `(temperature, top_p)` cell and shared by every
/// variant generated in that cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    /// Sampling temperature.
    pub temperature: f64,
    /// Nucleus sampling cutoff.
    pub top_p: f64,
    /// Completion length cap in tokens.
    pub max_tokens: u32,
}

/// Heuristic quality metrics for one response.
///
/// All unit-interval metrics are rounded to 3 decimals at creation so
/// stored and displayed values always agree. `overall` is the ranking
/// key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityMetrics {
    /// How much of the length target the response fills, in `[0, 1]`.
    pub length_efficiency: f64,
    /// Unique-token share of the response vocabulary, in `[0, 1]`.
    pub richness: f64,
    /// Share of prompt keywords echoed by the response, in `[0, 1]`.
    pub coverage: f64,
    /// Bullet and paragraph break density, in `[0, 1]`.
    pub structure: f64,
    /// Inverse of normalized sentence-length variance, in `[0, 1]`.
    pub clarity: f64,
    /// Weighted composite of the five metrics, in `[0, 1]`.
    pub overall: f64,
    /// Estimated reading time at 180 words per minute.
    pub reading_time_seconds: f64,
}

/// One generated and scored response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseVariant {
    pub id: Uuid,
    pub parameters: ParameterSet,
    pub text: String,
    pub metrics: QualityMetrics,
    /// One-sentence narration of the metric profile.
    pub analysis: String,
}

/// A completed sweep: the expanded grid plus its ranked responses.
///
/// Created by one sweep invocation and persisted or deleted as a
/// whole. `responses` is sorted descending by `metrics.overall`, ties
/// keeping generation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experiment {
    pub id: Uuid,
    pub prompt: String,
    pub created_at: DateTime<Utc>,
    /// Expanded temperature sample points, ascending.
    pub temperatures: Vec<f64>,
    /// Expanded top-p sample points, ascending.
    pub top_ps: Vec<f64>,
    /// Responses generated per grid cell, after clamping.
    pub variants_per_combo: u32,
    /// Completion token cap, after clamping.
    pub max_tokens: u32,
    pub summary: String,
    pub responses: Vec<ResponseVariant>,
}

/// Request payload for creating a sweep experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepRequest {
    pub prompt: String,
    #[serde(default)]
    pub temperature_range: RangeSpec,
    #[serde(default)]
    pub top_p_range: RangeSpec,
    /// Requested repetitions per cell; clamped to `1..=4`.
    #[serde(default)]
    pub variants_per_combo: u32,
    /// Requested completion cap; clamped to `120..=800`.
    #[serde(default)]
    pub max_tokens: u32,
}
