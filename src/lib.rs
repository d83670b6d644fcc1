//! ladle - Schema-validated recipe generation with an LLM backend and a
//! deterministic fallback
//!
//! ladle turns a small structured request (theme, ingredients, preference
//! flags) into a complete recipe. Two generators implement the same
//! capability:
//!
//! - **Local**: a pure, deterministic generator with stable identifiers.
//!   No network, no credentials, never fails.
//! - **Remote**: an LLM-backed orchestrator that prompts an
//!   OpenAI-compatible API with a strict JSON schema, validates the output,
//!   and retries once with validation feedback before giving up.
//!
//! Generator choice, credential resolution, and local fallback live in
//! [`select_generator`]; the embedding service decides policy through
//! [`GeneratorConfig`] and observes outcomes through shared
//! [`GenerationMetrics`] counters and structured tracing events.
//!
//! # Quick Start
//!
//! Local generation needs no configuration or credentials:
//!
//! ```rust
//! use ladle::{RecipeRequest, generate_deterministic};
//!
//! let request = RecipeRequest {
//!     theme: Some("Tuscan".to_string()),
//!     ingredients: vec!["chicken".to_string(), "rice".to_string()],
//!     ..RecipeRequest::default()
//! };
//!
//! let recipe = generate_deterministic(&request);
//! assert_eq!(recipe.title, "Tuscan Recipe");
//! assert_eq!(recipe.ingredients.len(), 2);
//! ```
//!
//! Production services select a generator from configuration once at
//! startup and reuse it across requests:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use ladle::{
//!     GenerationMetrics, GeneratorConfig, RecipeGenerator, RecipeRequest, select_generator,
//! };
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let metrics = Arc::new(GenerationMetrics::new());
//! let generator = select_generator(&GeneratorConfig::local(), Arc::clone(&metrics))?;
//!
//! let recipe = generator.generate(&RecipeRequest::default()).await?;
//! println!("{} ({} min)", recipe.title, recipe.time_minutes);
//! # Ok(())
//! # }
//! ```
//!
//! # Error boundary
//!
//! Request-time failures surface as [`GenerationFailure`], which carries an
//! [`ErrorKind`] and the transport retry count and nothing else: provider
//! error text, prompts, and model output never cross the boundary or reach
//! logs unredacted. Configuration and credential problems surface at
//! startup as [`ConfigError`].

pub mod deterministic;
pub mod generator;
pub mod orchestrator;
pub mod selector;
pub mod telemetry;

/// Request and recipe model types, shared with the schema validator.
pub use ladle_schema::{
    CookMode, DISH_SUMMARY_MAX_CHARS, Recipe, RecipeIngredient, RecipeRequest, RecipeStep,
    SchemaViolation, recipe_schema, strict_recipe_schema, to_strict_schema,
    validate_recipe_payload,
};

/// Generator configuration: mode, fallback policy, remote endpoint.
pub use ladle_config::{ConfigError, GeneratorConfig, GeneratorMode, RemoteConfig};

/// LLM transport surface, re-exported for custom backends and retry tuning.
pub use ladle_llm::{ChatMessage, ErrorKind, LlmBackend, LlmError, LlmInvocation, RetryPolicy};

/// Scripted backend for downstream test suites (`test-utils` feature).
#[cfg(feature = "test-utils")]
pub use ladle_llm::ScriptedBackend;

pub use deterministic::{DeterministicGenerator, generate_deterministic};
pub use generator::{GenerationFailure, RecipeGenerator};
pub use orchestrator::LlmRecipeGenerator;
pub use selector::select_generator;
pub use telemetry::{GENERATION_EVENT_TARGET, GenerationMetrics, MetricsSnapshot, RequestShape};
