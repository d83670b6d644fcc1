//! Recipe schema derivation and the strict-mode transform
//!
//! Remote structured-output APIs accept a JSON Schema but only honor it
//! reliably in "strict" mode: every object's properties listed as required
//! and additional properties forbidden, recursively. The transform here
//! tightens the schemars-derived Recipe schema into that shape; the result
//! doubles as the validation schema so the wire contract and the validator
//! can never drift apart.

use once_cell::sync::Lazy;
use schemars::schema_for;
use serde_json::{Value, json};

use crate::types::Recipe;

static RECIPE_SCHEMA: Lazy<Value> = Lazy::new(|| {
    let mut schema =
        serde_json::to_value(schema_for!(Recipe)).expect("recipe schema serializes");
    apply_field_bounds(&mut schema);
    schema
});

static STRICT_RECIPE_SCHEMA: Lazy<Value> = Lazy::new(|| to_strict_schema(&RECIPE_SCHEMA));

/// The JSON Schema derived from [`Recipe`], with numeric field bounds applied.
#[must_use]
pub fn recipe_schema() -> &'static Value {
    &RECIPE_SCHEMA
}

/// The strict-mode Recipe schema: all properties required,
/// `additionalProperties: false`, recursively.
#[must_use]
pub fn strict_recipe_schema() -> &'static Value {
    &STRICT_RECIPE_SCHEMA
}

/// Tighten a JSON Schema to strict mode.
///
/// For every object node that declares `properties`, `required` is set to
/// exactly the declared property keys and `additionalProperties` defaults to
/// `false` (a preexisting explicit value is kept). The walk recurses through
/// `properties`, `items`, the composition keywords
/// (`anyOf`/`allOf`/`oneOf`/`prefixItems`), and schema definitions under
/// `$defs` or `definitions`. The input is not mutated.
#[must_use]
pub fn to_strict_schema(schema: &Value) -> Value {
    let mut strict = schema.clone();
    tighten(&mut strict);
    strict
}

fn tighten(node: &mut Value) {
    match node {
        Value::Object(map) => {
            let property_keys: Option<Vec<Value>> = match map.get("properties") {
                Some(Value::Object(properties)) => Some(
                    properties
                        .keys()
                        .map(|key| Value::String(key.clone()))
                        .collect(),
                ),
                _ => None,
            };
            if let Some(keys) = property_keys {
                map.insert("required".to_string(), Value::Array(keys));
                map.entry("additionalProperties").or_insert(Value::Bool(false));
            }

            if let Some(Value::Object(properties)) = map.get_mut("properties") {
                for value in properties.values_mut() {
                    tighten(value);
                }
            }

            if let Some(items) = map.get_mut("items") {
                tighten(items);
            }

            for keyword in ["anyOf", "allOf", "oneOf", "prefixItems"] {
                if let Some(Value::Array(values)) = map.get_mut(keyword) {
                    for value in values {
                        tighten(value);
                    }
                }
            }

            for keyword in ["$defs", "definitions"] {
                if let Some(Value::Object(definitions)) = map.get_mut(keyword) {
                    for value in definitions.values_mut() {
                        tighten(value);
                    }
                }
            }
        }
        Value::Array(values) => {
            for value in values {
                tighten(value);
            }
        }
        _ => {}
    }
}

/// Bounds the derive cannot express: positive servings and time, and the
/// 1..=320 character budget for `dish_summary`.
fn apply_field_bounds(schema: &mut Value) {
    let Some(properties) = schema
        .get_mut("properties")
        .and_then(Value::as_object_mut)
    else {
        return;
    };

    for field in ["servings", "time_minutes"] {
        if let Some(bounds) = properties.get_mut(field).and_then(Value::as_object_mut) {
            bounds.insert("minimum".to_string(), json!(1));
        }
    }

    if let Some(summary) = properties
        .get_mut("dish_summary")
        .and_then(Value::as_object_mut)
    {
        summary.insert("minLength".to_string(), json!(1));
        summary.insert(
            "maxLength".to_string(),
            json!(crate::types::DISH_SUMMARY_MAX_CHARS),
        );
    }
}
