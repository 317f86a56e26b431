//! Numeric scan ranges: partial specification, normalization, expansion.

use serde::{Deserialize, Serialize};

use super::error::RangeError;

/// Step applied when a range omits one.
const DEFAULT_STEP: f64 = 0.1;

/// A possibly partial range specification as supplied by callers.
///
/// Missing fields are filled during [`NumericRange::normalize`]:
/// `min` defaults to `0.0`, `max` to `min`, `step` to `0.1`. Defaults
/// live here in one place instead of being scattered through sweep
/// construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeSpec {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
}

impl RangeSpec {
    /// Fully specified range.
    pub fn new(min: f64, max: f64, step: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            step: Some(step),
        }
    }

    /// Degenerate single-point range.
    pub fn single(value: f64) -> Self {
        Self {
            min: Some(value),
            max: Some(value),
            step: None,
        }
    }
}

/// A validated inclusive scan range.
///
/// Fields are private so every constructed value already satisfies the
/// invariants: all components finite, `step > 0`, `max >= min`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericRange {
    min: f64,
    max: f64,
    step: f64,
}

impl NumericRange {
    /// Apply defaults to `spec` and validate the result.
    pub fn normalize(spec: RangeSpec) -> Result<Self, RangeError> {
        let min = spec.min.unwrap_or(0.0);
        let max = spec.max.unwrap_or(min);
        let step = spec.step.unwrap_or(DEFAULT_STEP);

        if !min.is_finite() || !max.is_finite() || !step.is_finite() {
            return Err(RangeError::NonFinite);
        }
        if step <= 0.0 {
            return Err(RangeError::NonPositiveStep { step });
        }
        if max < min {
            return Err(RangeError::MaxBelowMin { min, max });
        }

        Ok(Self { min, max, step })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Expand into ascending sample points `min, min + step, ...`,
    /// inclusive of `max`.
    ///
    /// The loop bound carries a half-step tolerance so accumulated
    /// float error cannot drop the final boundary point. Every emitted
    /// point is rounded to 2 decimals. Always yields at least `min`.
    pub fn expand(&self) -> Vec<f64> {
        let limit = self.max + self.step / 2.0;
        let mut points = Vec::new();
        let mut current = self.min;
        while current <= limit {
            points.push(round2(current));
            current += self.step;
        }
        points
    }
}

impl TryFrom<RangeSpec> for NumericRange {
    type Error = RangeError;

    fn try_from(spec: RangeSpec) -> Result<Self, Self::Error> {
        Self::normalize(spec)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
