//! Property-based tests for the deterministic generator.
//!
//! Verifies the invariants callers rely on across a wide range of request
//! shapes: idempotence (same request, same recipe, same id), structural
//! consistency, and schema validity of every produced recipe.
//!
//! Property test case counts can be configured via `PROPTEST_CASES`
//! (default: 64).

use ladle::{
    DISH_SUMMARY_MAX_CHARS, RecipeRequest, generate_deterministic, validate_recipe_payload,
};
use proptest::prelude::*;
use std::env;

const DEFAULT_PROPTEST_CASES: u32 = 64;

fn proptest_config() -> ProptestConfig {
    let cases = env::var("PROPTEST_CASES")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(DEFAULT_PROPTEST_CASES);

    ProptestConfig {
        cases,
        ..ProptestConfig::default()
    }
}

/// Generate request-shaped inputs, from empty fields up to themes and
/// ingredient names long enough to overflow the summary bound
fn arb_request() -> impl Strategy<Value = RecipeRequest> {
    (
        proptest::option::of("[A-Za-z ]{0,360}"),
        proptest::collection::vec("[a-z]{1,40}", 0..5),
        any::<bool>(),
        any::<bool>(),
        proptest::option::of("[a-z ]{0,24}"),
    )
        .prop_map(|(theme, ingredients, healthy, quick_easy, notes)| RecipeRequest {
            theme,
            ingredients,
            healthy,
            quick_easy,
            notes,
        })
}

/// Property: the generator is idempotent, identifier included
#[test]
fn prop_same_request_yields_same_recipe() {
    proptest!(proptest_config(), |(request in arb_request())| {
        let first = generate_deterministic(&request);
        let second = generate_deterministic(&request);
        prop_assert_eq!(first, second);
    });
}

/// Property: every produced recipe passes strict schema validation
#[test]
fn prop_output_is_schema_valid() {
    proptest!(proptest_config(), |(request in arb_request())| {
        let recipe = generate_deterministic(&request);
        let payload = serde_json::to_value(&recipe).expect("recipe serializes");
        let validation = validate_recipe_payload(&payload);
        prop_assert!(
            validation.is_ok(),
            "violations: {:?}",
            validation.err()
        );
    });
}

/// Property: steps are numbered contiguously from 1
#[test]
fn prop_step_numbers_are_contiguous() {
    proptest!(proptest_config(), |(request in arb_request())| {
        let recipe = generate_deterministic(&request);
        prop_assert!(!recipe.steps.is_empty());
        for (idx, step) in recipe.steps.iter().enumerate() {
            prop_assert_eq!(step.step, idx as u32 + 1);
        }
    });
}

/// Property: cook mode stays consistent with the recipe's own lists
#[test]
fn prop_cook_mode_mirrors_recipe_lists() {
    proptest!(proptest_config(), |(request in arb_request())| {
        let recipe = generate_deterministic(&request);
        prop_assert_eq!(
            &recipe.cook_mode.ingredients_checklist,
            &recipe.ingredients
        );
        let texts: Vec<String> =
            recipe.steps.iter().map(|step| step.text.clone()).collect();
        prop_assert_eq!(&recipe.cook_mode.step_cards, &texts);
    });
}

/// Property: summaries stay within the schema bound
#[test]
fn prop_dish_summary_stays_in_bounds() {
    proptest!(proptest_config(), |(request in arb_request())| {
        let recipe = generate_deterministic(&request);
        let chars = recipe.dish_summary.chars().count();
        prop_assert!(chars >= 1);
        prop_assert!(chars <= DISH_SUMMARY_MAX_CHARS);
    });
}

/// An overlong theme truncates the summary instead of breaking validation
#[test]
fn test_overlong_theme_output_still_validates() {
    let request = RecipeRequest {
        theme: Some("Generously spiced harvest banquet centerpiece ".repeat(9)),
        ingredients: vec!["chicken".to_string(), "rice".to_string()],
        ..RecipeRequest::default()
    };

    let recipe = generate_deterministic(&request);

    assert_eq!(recipe.dish_summary.chars().count(), DISH_SUMMARY_MAX_CHARS);
    let payload = serde_json::to_value(&recipe).expect("recipe serializes");
    assert!(validate_recipe_payload(&payload).is_ok());
}

/// Long ingredient names flow into the summary and truncate the same way
#[test]
fn test_long_ingredient_names_output_still_validates() {
    let name = "hand harvested mountain oregano with flowering stems".repeat(4);
    let request = RecipeRequest {
        ingredients: vec![name.clone(), name],
        ..RecipeRequest::default()
    };

    let recipe = generate_deterministic(&request);

    assert_eq!(recipe.dish_summary.chars().count(), DISH_SUMMARY_MAX_CHARS);
    let payload = serde_json::to_value(&recipe).expect("recipe serializes");
    assert!(validate_recipe_payload(&payload).is_ok());
}

/// Property: recipe ids are 32 lowercase hex characters
#[test]
fn prop_recipe_id_is_stable_hex() {
    proptest!(proptest_config(), |(request in arb_request())| {
        let recipe = generate_deterministic(&request);
        prop_assert_eq!(recipe.id.len(), 32);
        prop_assert!(recipe.id.chars().all(|c| c.is_ascii_hexdigit()));
    });
}

#[test]
fn test_full_request_end_to_end() {
    let request = RecipeRequest {
        theme: Some("Tuscan".to_string()),
        ingredients: vec![
            "chicken".to_string(),
            "rice".to_string(),
            "garlic".to_string(),
        ],
        healthy: true,
        quick_easy: true,
        notes: Some("keep it simple".to_string()),
    };

    let recipe = generate_deterministic(&request);

    assert_eq!(recipe.title, "Tuscan Recipe");
    let names: Vec<&str> = recipe
        .ingredients
        .iter()
        .map(|ingredient| ingredient.name.as_str())
        .collect();
    assert_eq!(names, vec!["chicken", "rice", "garlic"]);
    assert_eq!(recipe.steps.len(), 3);
    assert_eq!(recipe.time_minutes, 20);
    assert_eq!(recipe.difficulty, "easy");
    assert!(!recipe.dish_summary.is_empty());
    assert!(recipe.dish_summary.chars().count() <= DISH_SUMMARY_MAX_CHARS);

    let payload = serde_json::to_value(&recipe).expect("recipe serializes");
    assert!(validate_recipe_payload(&payload).is_ok());

    // Stable across repeated generation.
    assert_eq!(generate_deterministic(&request).id, recipe.id);
}
