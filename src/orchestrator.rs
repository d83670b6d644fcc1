//! Remote generation orchestrator.
//!
//! Drives one model call plus at most one validation-driven regeneration:
//! prompt, invoke through the transport retry layer, parse, validate
//! against the strict Recipe schema, and stamp a fresh id. Schema
//! violations from the first attempt are fed back to the model verbatim;
//! a second failure is terminal.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use ladle_config::{ConfigError, GeneratorMode, RemoteConfig};
use ladle_llm::{
    ChatMessage, ErrorKind, LlmBackend, LlmInvocation, OpenAiBackend, RetryPolicy,
    invoke_with_retry,
};
use ladle_schema::{
    Recipe, RecipeRequest, SchemaViolation, strict_recipe_schema, validate_recipe_payload,
};
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::generator::{GenerationFailure, RecipeGenerator};
use crate::telemetry::{self, GenerationMetrics, RequestShape};

/// One initial attempt plus one validation-feedback regeneration
const MAX_SCHEMA_ATTEMPTS: usize = 2;

const SYSTEM_PROMPT: &str = "Generate a recipe JSON object that strictly matches the \
provided JSON schema. No extra keys. Keep ingredient and step order logical. Set \
dish_summary to a concise 1-3 sentence summary (max 320 chars).";

const REGENERATE_PROMPT: &str =
    "Previous output failed validation. Fix all issues and regenerate. Validation errors: ";

/// Remote-mode generator backed by an LLM.
pub struct LlmRecipeGenerator {
    backend: Box<dyn LlmBackend>,
    retry: RetryPolicy,
    model: String,
    max_output_tokens: u32,
    timeout: Duration,
    metrics: Arc<GenerationMetrics>,
}

impl LlmRecipeGenerator {
    /// Build a generator over an [`OpenAiBackend`] from remote config and
    /// an already-resolved API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the HTTP backend cannot be
    /// constructed.
    pub fn from_remote_config(
        remote: &RemoteConfig,
        api_key: String,
        metrics: Arc<GenerationMetrics>,
    ) -> Result<Self, ConfigError> {
        let backend = OpenAiBackend::from_config(remote, api_key)?;
        Ok(Self {
            backend: Box::new(backend),
            retry: RetryPolicy::default(),
            model: remote.model.clone(),
            max_output_tokens: remote.max_output_tokens,
            timeout: remote.request_timeout(),
            metrics,
        })
    }

    /// Build a generator over an arbitrary backend, with default remote
    /// limits. Primarily a seam for scripted backends.
    #[must_use]
    pub fn with_backend(
        backend: Box<dyn LlmBackend>,
        model: impl Into<String>,
        metrics: Arc<GenerationMetrics>,
    ) -> Self {
        let defaults = RemoteConfig::default();
        Self {
            backend,
            retry: RetryPolicy::default(),
            model: model.into(),
            max_output_tokens: defaults.max_output_tokens,
            timeout: defaults.request_timeout(),
            metrics,
        }
    }

    /// Replace the transport retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry = policy;
        self
    }

    fn build_invocation(&self, request_json: &str, feedback: Option<&str>) -> LlmInvocation {
        let mut user = format!("Input request: {request_json}");
        if let Some(feedback) = feedback {
            user.push_str(&format!("\n{REGENERATE_PROMPT}{feedback}"));
        }
        LlmInvocation::new(
            self.model.clone(),
            vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(user)],
            strict_recipe_schema().clone(),
            self.max_output_tokens,
            self.timeout,
        )
    }

    /// Terminal failure: bump the counter, emit the outcome event, and
    /// hand back the boundary error.
    fn fail(&self, kind: ErrorKind, retry_count: u32, shape: RequestShape) -> GenerationFailure {
        self.metrics.record_failure();
        telemetry::emit_failure(GeneratorMode::Remote, kind, retry_count, shape);
        GenerationFailure { kind, retry_count }
    }

    fn succeed(&self, mut recipe: Recipe, retry_count: u32, shape: RequestShape) -> Recipe {
        recipe.id = Uuid::new_v4().to_string();
        self.metrics.record_success();
        telemetry::emit_success(GeneratorMode::Remote, retry_count, shape);
        recipe
    }
}

#[async_trait]
impl RecipeGenerator for LlmRecipeGenerator {
    async fn generate(&self, request: &RecipeRequest) -> Result<Recipe, GenerationFailure> {
        let shape = RequestShape::from(request);

        let request_json = match serde_json::to_string(request) {
            Ok(json) => json,
            Err(_) => return Err(self.fail(ErrorKind::Unknown, 0, shape)),
        };

        let mut feedback: Option<String> = None;

        for attempt in 0..MAX_SCHEMA_ATTEMPTS {
            let invocation = self.build_invocation(&request_json, feedback.as_deref());

            let reply =
                match invoke_with_retry(self.backend.as_ref(), &invocation, &self.retry).await {
                    Ok(reply) => reply,
                    Err(failure) => {
                        let terminal = GenerationFailure::from(failure);
                        return Err(self.fail(terminal.kind, terminal.retry_count, shape));
                    }
                };

            // Output that is not a JSON object is terminal; the feedback
            // pass only helps with schema-level violations.
            let payload: Value = match serde_json::from_str(&reply.text) {
                Ok(value) => value,
                Err(_) => {
                    return Err(self.fail(
                        ErrorKind::InvalidModelOutput,
                        reply.transport_retries,
                        shape,
                    ));
                }
            };
            if !payload.is_object() {
                return Err(self.fail(
                    ErrorKind::InvalidModelOutput,
                    reply.transport_retries,
                    shape,
                ));
            }

            match validate_recipe_payload(&payload) {
                Ok(()) => {
                    let recipe: Recipe = match serde_json::from_value(payload) {
                        Ok(recipe) => recipe,
                        Err(_) => {
                            return Err(self.fail(
                                ErrorKind::InvalidModelOutput,
                                reply.transport_retries,
                                shape,
                            ));
                        }
                    };
                    return Ok(self.succeed(recipe, reply.transport_retries, shape));
                }
                Err(violations) => {
                    debug!(
                        attempt,
                        violations = violations.len(),
                        "model output failed schema validation"
                    );
                    if attempt + 1 == MAX_SCHEMA_ATTEMPTS {
                        return Err(self.fail(
                            ErrorKind::InvalidModelOutput,
                            reply.transport_retries,
                            shape,
                        ));
                    }
                    feedback = Some(violation_feedback(&violations));
                }
            }
        }

        // The bounded loop always returns; this is unreachable when
        // MAX_SCHEMA_ATTEMPTS > 0.
        Err(self.fail(ErrorKind::Unknown, 0, shape))
    }

    fn mode(&self) -> GeneratorMode {
        GeneratorMode::Remote
    }
}

/// Violation list as a JSON array, fed back to the model verbatim
fn violation_feedback(violations: &[SchemaViolation]) -> String {
    serde_json::to_string(violations).unwrap_or_else(|_| {
        violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    })
}
