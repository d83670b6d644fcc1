//! Payload validation against the strict Recipe schema

use std::fmt;

use jsonschema::Validator;
use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::Value;

use crate::strict::strict_recipe_schema;

static RECIPE_VALIDATOR: Lazy<Validator> = Lazy::new(|| {
    jsonschema::validator_for(strict_recipe_schema()).expect("recipe schema compiles")
});

/// A single schema violation, locating the offending value by JSON pointer.
///
/// Serializable so a violation list can be embedded verbatim in a
/// regeneration prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaViolation {
    /// JSON pointer to the offending value; `<root>` for the document itself
    pub path: String,
    /// Human-readable description of the violation
    pub message: String,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Validate an arbitrary JSON payload against the strict Recipe schema.
///
/// Collects every violation rather than stopping at the first, so the
/// caller can hand a remote model the complete list of problems to fix in
/// one regeneration pass.
///
/// # Errors
///
/// Returns the non-empty violation list when the payload does not conform.
pub fn validate_recipe_payload(payload: &Value) -> Result<(), Vec<SchemaViolation>> {
    let violations: Vec<SchemaViolation> = RECIPE_VALIDATOR
        .iter_errors(payload)
        .map(|error| {
            let path = error.instance_path().to_string();
            SchemaViolation {
                path: if path.is_empty() {
                    "<root>".to_string()
                } else {
                    path
                },
                message: error.to_string(),
            }
        })
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}
