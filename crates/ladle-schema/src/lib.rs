//! Recipe data model and schema validation
//!
//! This crate owns the structured types a generation pipeline traffics in
//! (`RecipeRequest` in, `Recipe` out), the JSON Schema derived from them,
//! the "strict" transform that pins every object in that schema to an exact
//! key set, and payload validation that reports every violation rather than
//! just the first.

mod strict;
mod types;
mod validate;

pub use strict::{recipe_schema, strict_recipe_schema, to_strict_schema};
pub use types::{
    CookMode, DISH_SUMMARY_MAX_CHARS, Recipe, RecipeIngredient, RecipeRequest, RecipeStep,
};
pub use validate::{SchemaViolation, validate_recipe_payload};
