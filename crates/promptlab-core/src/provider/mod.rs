//! Completion provider seam.
//!
//! The orchestrator consumes completions through
//! [`CompletionProvider`], so a sweep runs identically against a
//! hosted model or the bundled offline generator. Implementations
//! signal failure through [`ProviderError`] rather than returning
//! empty text.

pub mod offline;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::ParameterSet;

pub use offline::OfflineCompletionProvider;

/// Errors from completion generation.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("completion failed: {0}")]
    Failed(String),

    #[error("provider returned an empty completion")]
    EmptyCompletion,
}

/// Text-completion source for sweep cells.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Generate completion text for `prompt` under `params`.
    async fn generate(&self, prompt: &str, params: &ParameterSet)
        -> Result<String, ProviderError>;
}
