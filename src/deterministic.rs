//! Deterministic local recipe generator.
//!
//! A total function over the request: no I/O and no failure path. The
//! same request always yields the same recipe, identifier included, so
//! repeated saves of the same request can be detected downstream.

use std::sync::Arc;

use async_trait::async_trait;
use ladle_config::GeneratorMode;
use ladle_schema::{
    CookMode, DISH_SUMMARY_MAX_CHARS, Recipe, RecipeIngredient, RecipeRequest, RecipeStep,
};

use crate::generator::{GenerationFailure, RecipeGenerator};
use crate::telemetry::{self, GenerationMetrics, RequestShape};

const DEFAULT_THEME: &str = "Everyday";
const DEFAULT_INGREDIENT: &str = "water";

/// Hex characters kept from the content hash when deriving a recipe id
const ID_HEX_LEN: usize = 32;

/// Build a complete recipe from `request` without any model call.
///
/// Total and pure: every request maps to exactly one recipe that passes
/// strict schema validation. A blank or missing theme falls back to
/// "Everyday", an empty ingredient list falls back to a single "water"
/// entry, and a summary that would exceed the schema's character bound is
/// truncated to fit.
#[must_use]
pub fn generate_deterministic(request: &RecipeRequest) -> Recipe {
    let theme = request
        .theme
        .as_deref()
        .map(str::trim)
        .filter(|theme| !theme.is_empty())
        .unwrap_or(DEFAULT_THEME);

    let names: Vec<String> = if request.ingredients.is_empty() {
        vec![DEFAULT_INGREDIENT.to_string()]
    } else {
        request.ingredients.clone()
    };

    let ingredients: Vec<RecipeIngredient> = names
        .iter()
        .map(|name| RecipeIngredient {
            name: name.clone(),
            amount: "1".to_string(),
            unit: "item".to_string(),
            optional: false,
        })
        .collect();

    let mut steps: Vec<RecipeStep> = names
        .iter()
        .enumerate()
        .map(|(idx, name)| RecipeStep {
            step: idx as u32 + 1,
            text: format!("Prepare {name}."),
            timer_minutes: None,
        })
        .collect();
    if steps.is_empty() {
        steps.push(RecipeStep {
            step: 1,
            text: "Combine ingredients and cook.".to_string(),
            timer_minutes: Some(10),
        });
    }

    let substitutions: Vec<String> = names
        .iter()
        .take(2)
        .map(|name| format!("Use any available alternative for {name}."))
        .collect();

    let summary_items = names.iter().take(2).cloned().collect::<Vec<_>>().join(", ");
    let mut dish_summary = format!(
        "A {} dish featuring {} with straightforward prep.",
        theme.to_lowercase(),
        summary_items
    );
    if dish_summary.chars().count() > DISH_SUMMARY_MAX_CHARS {
        // An overlong theme or ingredient name can push the composed text
        // past the schema's character bound.
        dish_summary = dish_summary.chars().take(DISH_SUMMARY_MAX_CHARS).collect();
    }

    let (time_minutes, difficulty) = if request.quick_easy {
        (20, "easy")
    } else {
        (35, "medium")
    };

    let cook_mode = CookMode {
        ingredients_checklist: ingredients.clone(),
        step_cards: steps.iter().map(|step| step.text.clone()).collect(),
    };

    Recipe {
        id: derive_recipe_id(theme, &names, request),
        title: format!("{theme} Recipe"),
        servings: 2,
        time_minutes,
        difficulty: difficulty.to_string(),
        dish_summary,
        ingredients,
        steps,
        substitutions,
        cook_mode,
    }
}

/// Stable content hash over the fields that shape the output
fn derive_recipe_id(theme: &str, names: &[String], request: &RecipeRequest) -> String {
    let canonical = format!(
        "{theme}|{}|{}|{}|{}",
        names.join(","),
        request.healthy,
        request.quick_easy,
        request.notes.as_deref().unwrap_or("")
    );
    let mut id = blake3::hash(canonical.as_bytes()).to_hex().to_string();
    id.truncate(ID_HEX_LEN);
    id
}

/// Local-mode generator: [`generate_deterministic`] plus telemetry
#[derive(Debug)]
pub struct DeterministicGenerator {
    metrics: Arc<GenerationMetrics>,
}

impl DeterministicGenerator {
    #[must_use]
    pub fn new(metrics: Arc<GenerationMetrics>) -> Self {
        Self { metrics }
    }
}

#[async_trait]
impl RecipeGenerator for DeterministicGenerator {
    async fn generate(&self, request: &RecipeRequest) -> Result<Recipe, GenerationFailure> {
        let recipe = generate_deterministic(request);
        self.metrics.record_success();
        telemetry::emit_success(GeneratorMode::Local, 0, RequestShape::from(request));
        Ok(recipe)
    }

    fn mode(&self) -> GeneratorMode {
        GeneratorMode::Local
    }
}
