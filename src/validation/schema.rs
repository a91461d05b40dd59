//! Validation gate for JSON Schema input
//!
//! Runs once over the whole document before any column is built:
//! - the document must be an object with a `properties` object
//! - `required` lists must be arrays of strings
//! - definitions containers must be objects
//! - every `$ref` into `definitions`/`$defs` must point at an existing
//!   definition; other local pointers are left to the meta-schema check
//! - the document must be a legal JSON Schema (meta-schema check, gated by
//!   the `schema-validation` feature)

use serde_json::{Map, Value};

use crate::convert::{ConversionConfig, ConversionError};
use crate::import::reference::{DefinitionResolver, is_definition_reference};

/// Validate a JSON Schema document before conversion
pub fn validate_json_schema(
    document: &Value,
    config: &ConversionConfig,
) -> Result<(), ConversionError> {
    let root = document.as_object().ok_or_else(|| {
        ConversionError::SchemaDefinition(format!(
            "JSON Schema must be an object, found {}",
            value_kind(document)
        ))
    })?;

    match root.get("properties") {
        Some(Value::Object(_)) => {}
        Some(other) => {
            return Err(ConversionError::SchemaDefinition(format!(
                "'properties' must be an object, found {}",
                value_kind(other)
            )));
        }
        None => {
            return Err(ConversionError::SchemaDefinition(
                "missing 'properties' at root".to_string(),
            ));
        }
    }

    for container in ["definitions", "$defs"] {
        if let Some(section) = root.get(container)
            && !section.is_object()
        {
            return Err(ConversionError::SchemaDefinition(format!(
                "'{}' must be an object, found {}",
                container,
                value_kind(section)
            )));
        }
    }

    let resolver = DefinitionResolver::new(root);
    check_node(root, &resolver, "root")?;

    if config.validate_meta_schema {
        validate_meta_schema(document)?;
    }

    Ok(())
}

/// Keywords whose value maps names to subschemas
const SCHEMA_MAPS: [&str; 5] = [
    "properties",
    "definitions",
    "$defs",
    "patternProperties",
    "dependentSchemas",
];

/// Keywords whose value is data, not a subschema
const DATA_KEYWORDS: [&str; 5] = ["required", "enum", "const", "examples", "default"];

/// Check `required` shapes and resolve definition references in the schema
/// at `path`
fn check_node(
    node: &Map<String, Value>,
    resolver: &DefinitionResolver<'_>,
    path: &str,
) -> Result<(), ConversionError> {
    if let Some(required) = node.get("required") {
        required_names(required, path)?;
    }

    if let Some(reference) = node.get("$ref") {
        let reference = reference.as_str().ok_or_else(|| {
            ConversionError::SchemaDefinition(format!("'$ref' at '{}' must be a string", path))
        })?;
        if is_definition_reference(reference) {
            resolver.resolve(reference)?;
        }
    }

    for (key, child) in node {
        if DATA_KEYWORDS.contains(&key.as_str()) || key == "$ref" {
            continue;
        }
        let child_path = format!("{}/{}", path, key);
        match child {
            Value::Object(map) if SCHEMA_MAPS.contains(&key.as_str()) => {
                for (name, schema) in map {
                    if let Value::Object(schema) = schema {
                        check_node(schema, resolver, &format!("{}/{}", child_path, name))?;
                    }
                }
            }
            Value::Object(schema) => check_node(schema, resolver, &child_path)?,
            Value::Array(items) => {
                for (idx, item) in items.iter().enumerate() {
                    if let Value::Object(item) = item {
                        check_node(item, resolver, &format!("{}/{}", child_path, idx))?;
                    }
                }
            }
            _ => {}
        }
    }

    Ok(())
}

/// Names listed in a `required` keyword
pub(crate) fn required_names<'a>(
    required: &'a Value,
    path: &str,
) -> Result<Vec<&'a str>, ConversionError> {
    let items = required.as_array().ok_or_else(|| {
        ConversionError::SchemaDefinition(format!(
            "malformed 'required' at '{}': expected an array, found {}",
            path,
            value_kind(required)
        ))
    })?;

    items
        .iter()
        .map(|item| {
            item.as_str().ok_or_else(|| {
                ConversionError::SchemaDefinition(format!(
                    "malformed 'required' at '{}': entries must be strings, found {}",
                    path,
                    value_kind(item)
                ))
            })
        })
        .collect()
}

/// Format validation error with path information
#[cfg(feature = "schema-validation")]
fn format_validation_error(error: &jsonschema::ValidationError) -> String {
    let path_str = error.instance_path().to_string();
    let path_str = if path_str == "/" || path_str.is_empty() {
        "root".to_string()
    } else {
        path_str
    };

    format!("invalid JSON Schema at path '{}': {}", path_str, error)
}

/// Compile the document as a JSON Schema, which checks it against its
/// meta-schema
#[cfg(feature = "schema-validation")]
fn validate_meta_schema(document: &Value) -> Result<(), ConversionError> {
    jsonschema::Validator::new(document)
        .map(|_| ())
        .map_err(|error| ConversionError::SchemaDefinition(format_validation_error(&error)))
}

#[cfg(not(feature = "schema-validation"))]
fn validate_meta_schema(_document: &Value) -> Result<(), ConversionError> {
    // Validation disabled - feature not enabled
    Ok(())
}

pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
