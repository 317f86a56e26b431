//! Error types for promptlab domain operations.

use thiserror::Error;

use crate::provider::ProviderError;
use crate::store::StoreError;

/// Errors produced while normalizing a numeric scan range.
#[derive(Debug, Error)]
pub enum RangeError {
    #[error("range bounds and step must be finite numbers")]
    NonFinite,

    #[error("step must be greater than 0 (got {step})")]
    NonPositiveStep { step: f64 },

    #[error("max must be greater than or equal to min (min {min}, max {max})")]
    MaxBelowMin { min: f64, max: f64 },
}

/// Top-level error type for promptlab operations.
#[derive(Debug, Error)]
pub enum PromptLabError {
    #[error("invalid range: {0}")]
    InvalidRange(#[from] RangeError),

    #[error("prompt must not be empty")]
    EmptyPrompt,

    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

/// Result type alias for promptlab operations.
pub type Result<T> = std::result::Result<T, PromptLabError>;
