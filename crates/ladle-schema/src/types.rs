//! Core model types for recipe generation

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Upper bound on `dish_summary` length, in characters.
///
/// Enforced by the Recipe schema (`maxLength`) and promised to the remote
/// model in the generation prompt.
pub const DISH_SUMMARY_MAX_CHARS: usize = 320;

/// A user's generation request.
///
/// Immutable input, constructed once per generation call. All fields carry
/// serde defaults so a sparse JSON object (`{"ingredients": ["rice"]}`)
/// deserializes without ceremony.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RecipeRequest {
    /// Free-text theme, e.g. "Tuscan" or "weeknight comfort food"
    #[serde(default)]
    pub theme: Option<String>,
    /// Ordered ingredient names; may be empty
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Prefer healthier preparations
    #[serde(default)]
    pub healthy: bool,
    /// Prefer quick, low-effort preparations
    #[serde(default)]
    pub quick_easy: bool,
    /// Free-text notes passed through to the generator
    #[serde(default)]
    pub notes: Option<String>,
}

/// A single ingredient line in a generated recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RecipeIngredient {
    /// Ingredient name, e.g. "garlic"
    pub name: String,
    /// Quantity as unit-agnostic text, e.g. "1" or "2-3"
    pub amount: String,
    /// Unit text, e.g. "cloves" or "item"
    pub unit: String,
    /// Whether the ingredient can be omitted
    #[serde(default)]
    pub optional: bool,
}

/// A single preparation step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RecipeStep {
    /// 1-based step number; contiguous within a recipe
    pub step: u32,
    /// Instruction text
    pub text: String,
    /// Optional timer for this step, in minutes
    #[serde(default)]
    pub timer_minutes: Option<u32>,
}

/// Presentation-oriented view of a recipe: an ingredient checklist plus
/// ordered step cards, kept consistent with the recipe's own lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CookMode {
    /// Mirrors `Recipe::ingredients` 1:1
    pub ingredients_checklist: Vec<RecipeIngredient>,
    /// Mirrors step text, in step order
    pub step_cards: Vec<String>,
}

/// A fully structured recipe.
///
/// The `id` is always assigned by the generation pipeline. Identifiers
/// embedded in a remote model's response are discarded and replaced, so an
/// upstream payload can never pick its own identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Recipe {
    /// Pipeline-assigned unique identifier
    pub id: String,
    pub title: String,
    /// Number of servings; at least 1
    pub servings: u32,
    /// Total preparation time; at least 1
    pub time_minutes: u32,
    /// Free-text difficulty, e.g. "easy" or "medium"
    pub difficulty: String,
    /// Concise 1-3 sentence summary, trimmed, 1 to
    /// [`DISH_SUMMARY_MAX_CHARS`] characters
    pub dish_summary: String,
    /// Ordered ingredient lines
    pub ingredients: Vec<RecipeIngredient>,
    /// Ordered steps, numbered 1..N
    pub steps: Vec<RecipeStep>,
    /// Suggested substitutions
    pub substitutions: Vec<String>,
    /// Derived checklist/step-card view
    pub cook_mode: CookMode,
}
