//! Generation telemetry: outcome counters and terminal events.
//!
//! Every generation call ends in exactly one terminal event on the
//! `ladle::generation` target, carrying the outcome and the shape of the
//! request but never its free text. Counters are plain atomics so callers
//! can share one [`GenerationMetrics`] across generators and threads.

use std::sync::atomic::{AtomicU64, Ordering};

use ladle_config::GeneratorMode;
use ladle_llm::ErrorKind;
use ladle_schema::RecipeRequest;
use tracing::{info, warn};

/// Event target for terminal generation outcomes, shared by both modes.
pub const GENERATION_EVENT_TARGET: &str = "ladle::generation";

/// Shared outcome counters for recipe generation.
///
/// `success` and `failure` count terminal outcomes of `generate` calls;
/// `fallback` counts selector decisions that substituted the local
/// generator for an unusable remote configuration.
#[derive(Debug, Default)]
pub struct GenerationMetrics {
    success: AtomicU64,
    failure: AtomicU64,
    fallback: AtomicU64,
}

impl GenerationMetrics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&self) {
        self.success.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failure.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fallback(&self) {
        self.fallback.fetch_add(1, Ordering::Relaxed);
    }

    /// Consistent-enough point-in-time read of all three counters.
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            success: self.success.load(Ordering::Relaxed),
            failure: self.failure.load(Ordering::Relaxed),
            fallback: self.fallback.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time counter values from [`GenerationMetrics::snapshot`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub success: u64,
    pub failure: u64,
    pub fallback: u64,
}

/// Loggable shape of a [`RecipeRequest`].
///
/// Carries booleans and counts only; theme, ingredient names, and notes
/// stay out of telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestShape {
    pub has_theme: bool,
    pub ingredients_count: usize,
    pub healthy: bool,
    pub quick_easy: bool,
}

impl From<&RecipeRequest> for RequestShape {
    fn from(request: &RecipeRequest) -> Self {
        Self {
            has_theme: request.theme.is_some(),
            ingredients_count: request.ingredients.len(),
            healthy: request.healthy,
            quick_easy: request.quick_easy,
        }
    }
}

pub(crate) fn emit_success(mode: GeneratorMode, retry_count: u32, shape: RequestShape) {
    info!(
        target: GENERATION_EVENT_TARGET,
        outcome = "success",
        generator_mode = %mode,
        retry_count,
        has_theme = shape.has_theme,
        ingredients_count = shape.ingredients_count,
        healthy = shape.healthy,
        quick_easy = shape.quick_easy,
        "recipe generation succeeded"
    );
}

pub(crate) fn emit_failure(
    mode: GeneratorMode,
    kind: ErrorKind,
    retry_count: u32,
    shape: RequestShape,
) {
    warn!(
        target: GENERATION_EVENT_TARGET,
        outcome = "failure",
        generator_mode = %mode,
        error_kind = kind.as_str(),
        retry_count,
        has_theme = shape.has_theme,
        ingredients_count = shape.ingredients_count,
        healthy = shape.healthy,
        quick_easy = shape.quick_easy,
        "recipe generation failed"
    );
}
