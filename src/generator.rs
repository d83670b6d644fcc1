//! Generator capability boundary.
//!
//! Callers see one trait and one failure type. The failure carries an
//! error kind and a retry count only; message text from providers or
//! model output never crosses this boundary.

use async_trait::async_trait;
use ladle_config::GeneratorMode;
use ladle_llm::{ErrorKind, LlmCallFailure};
use ladle_schema::{Recipe, RecipeRequest};
use thiserror::Error;

/// Terminal failure of a generation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("recipe generation failed: {kind} (after {retry_count} transport retries)")]
pub struct GenerationFailure {
    /// Classification of the final error
    pub kind: ErrorKind,
    /// Transport retries consumed by the most recent model call
    pub retry_count: u32,
}

impl From<LlmCallFailure> for GenerationFailure {
    fn from(failure: LlmCallFailure) -> Self {
        Self {
            kind: failure.error.kind(),
            retry_count: failure.transport_retries,
        }
    }
}

/// A recipe generator.
///
/// Implementations own their telemetry: each `generate` call emits exactly
/// one terminal outcome event and bumps the matching counter.
#[async_trait]
pub trait RecipeGenerator: Send + Sync {
    /// Generate a complete, schema-valid recipe for `request`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationFailure`] when no valid recipe could be
    /// produced.
    async fn generate(&self, request: &RecipeRequest) -> Result<Recipe, GenerationFailure>;

    /// The mode this generator serves
    fn mode(&self) -> GeneratorMode;
}
