//! JSON Schema importer
//!
//! Converts a JSON Schema document into an ordered list of warehouse column
//! descriptors, recursing into nested objects and `$ref`'d definitions.

use serde_json::{Map, Value};
use std::collections::HashSet;

use super::reference::{DefinitionResolver, ExpansionStack};
use crate::convert::type_map::{column_type_for_format, column_type_for_type};
use crate::convert::{ConversionConfig, ConversionError};
use crate::models::{Column, ColumnMode, ColumnType};
use crate::validation::schema::{required_names, validate_json_schema, value_kind};

/// JSON Schema Importer
///
/// Builds column descriptors from a parsed JSON Schema document. The
/// document is validated once up front; conversion is all-or-nothing.
///
/// # Example
///
/// ```rust
/// use gbqschema_converter::import::JsonSchemaImporter;
/// use gbqschema_converter::models::ColumnType;
/// use serde_json::json;
///
/// let schema = json!({
///     "properties": {
///         "created": {"type": "string", "format": "date-time"},
///         "home": {"$ref": "#/definitions/Address"}
///     },
///     "definitions": {
///         "Address": {"type": "object", "properties": {"city": {"type": "string"}}}
///     }
/// });
///
/// let columns = JsonSchemaImporter::new().import(&schema).unwrap();
/// assert_eq!(columns[0].column_type, ColumnType::Timestamp);
/// assert_eq!(columns[1].column_type, ColumnType::Record);
/// assert_eq!(columns[1].nested()[0].name, "city");
/// ```
#[derive(Debug, Default)]
pub struct JsonSchemaImporter {
    config: ConversionConfig,
}

impl JsonSchemaImporter {
    /// Create a new JsonSchemaImporter with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ConversionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Convert a JSON Schema document into column descriptors
    ///
    /// # Errors
    ///
    /// - [`ConversionError::SchemaDefinition`] if the document is not a valid
    ///   JSON Schema, or a field has none of `type`, `format` and `$ref`
    /// - [`ConversionError::ReferenceResolution`] if a `$ref` target is missing
    /// - [`ConversionError::CircularReference`] if definitions reference each
    ///   other in a cycle
    /// - [`ConversionError::MaxDepthExceeded`] if nesting is deeper than a
    ///   configured `max_depth`
    pub fn import(&self, document: &Value) -> Result<Vec<Column>, ConversionError> {
        validate_json_schema(document, &self.config)?;

        let root = document.as_object().ok_or_else(|| {
            ConversionError::SchemaDefinition("JSON Schema must be an object".to_string())
        })?;

        let mut builder = ColumnBuilder {
            config: &self.config,
            resolver: DefinitionResolver::new(root),
            expanding: ExpansionStack::default(),
        };
        let columns = builder.columns(root, "", 0)?;

        tracing::debug!(columns = columns.len(), "Built column schema");
        Ok(columns)
    }
}

/// State of one forward conversion
struct ColumnBuilder<'a> {
    config: &'a ConversionConfig,
    resolver: DefinitionResolver<'a>,
    expanding: ExpansionStack,
}

impl<'a> ColumnBuilder<'a> {
    /// Columns for the `properties` of an object schema, in document order
    fn columns(
        &mut self,
        schema: &'a Map<String, Value>,
        path: &str,
        depth: usize,
    ) -> Result<Vec<Column>, ConversionError> {
        self.config.check_depth(depth)?;

        let properties = match schema.get("properties") {
            Some(Value::Object(properties)) => properties,
            Some(other) => {
                return Err(ConversionError::SchemaDefinition(format!(
                    "'properties' of '{}' must be an object, found {}",
                    display_path(path),
                    value_kind(other)
                )));
            }
            None => {
                return Err(ConversionError::SchemaDefinition(format!(
                    "record '{}' has no 'properties'",
                    display_path(path)
                )));
            }
        };

        let required: HashSet<&str> = match schema.get("required") {
            Some(required) => required_names(required, display_path(path))?
                .into_iter()
                .collect(),
            None => HashSet::new(),
        };

        let mut output = Vec::with_capacity(properties.len());
        for (name, field) in properties {
            let field_path = if path.is_empty() {
                name.clone()
            } else {
                format!("{}.{}", path, name)
            };
            tracing::debug!(key = %name, path = %field_path, "Processing property");

            let mode = ColumnMode::from_required(required.contains(name.as_str()));
            output.push(self.column(name, field, mode, &field_path, depth)?);
        }
        Ok(output)
    }

    fn column(
        &mut self,
        name: &str,
        field: &'a Value,
        mode: ColumnMode,
        path: &str,
        depth: usize,
    ) -> Result<Column, ConversionError> {
        let field = field.as_object().ok_or_else(|| {
            ConversionError::SchemaDefinition(format!(
                "field '{}' must be a schema object, found {}",
                path,
                value_kind(field)
            ))
        })?;

        let column_type = field_column_type(field, path)?;
        let description = description_of(field);

        if !column_type.is_record() {
            return Ok(Column::new(name, column_type)
                .with_mode(mode)
                .with_description(description));
        }

        let Some(reference) = field.get("$ref") else {
            let fields = self.columns(field, path, depth + 1)?;
            return Ok(Column::record(name, fields)
                .with_mode(mode)
                .with_description(description));
        };

        let reference = reference.as_str().ok_or_else(|| {
            ConversionError::SchemaDefinition(format!("'$ref' of '{}' must be a string", path))
        })?;
        let (target, definition) = self
            .resolver
            .resolve_chain(reference, self.config.follow_chained_refs)?;
        tracing::debug!(path = %path, reference = %target, "Resolved reference");

        self.expanding.enter(&target)?;
        let fields = self.columns(definition, path, depth + 1);
        self.expanding.leave();

        Ok(Column::record(name, fields?)
            .with_mode(mode)
            .with_description(description.or_else(|| description_of(definition))))
    }
}

/// Column type of a field schema: `format` first, then `type`, then `$ref`
fn field_column_type(
    field: &Map<String, Value>,
    path: &str,
) -> Result<ColumnType, ConversionError> {
    if let Some(format) = field.get("format") {
        let format = format.as_str().ok_or_else(|| {
            ConversionError::SchemaDefinition(format!("'format' of '{}' must be a string", path))
        })?;
        return Ok(column_type_for_format(format));
    }

    if let Some(type_value) = field.get("type") {
        let type_name = primary_type_name(type_value, path)?;
        return Ok(column_type_for_type(type_name).unwrap_or_else(|| {
            tracing::warn!(
                path = %path,
                "Unsupported type '{}', falling back to STRING",
                type_name
            );
            ColumnType::String
        }));
    }

    if field.contains_key("$ref") {
        return Ok(ColumnType::Record);
    }

    Err(ConversionError::SchemaDefinition(format!(
        "type not specified for field '{}': expected one of 'type', 'format' or '$ref'",
        path
    )))
}

/// Type name of a `type` keyword; for a type list the first non-null entry
fn primary_type_name<'v>(type_value: &'v Value, path: &str) -> Result<&'v str, ConversionError> {
    match type_value {
        Value::String(name) => Ok(name.as_str()),
        Value::Array(names) => {
            let names: Vec<&str> = names.iter().filter_map(Value::as_str).collect();
            names
                .iter()
                .find(|name| **name != "null")
                .or_else(|| names.first())
                .copied()
                .ok_or_else(|| {
                    ConversionError::SchemaDefinition(format!(
                        "'type' of '{}' lists no type names",
                        path
                    ))
                })
        }
        other => Err(ConversionError::SchemaDefinition(format!(
            "'type' of '{}' must be a string or an array, found {}",
            path,
            value_kind(other)
        ))),
    }
}

fn description_of(schema: &Map<String, Value>) -> Option<String> {
    schema
        .get("description")
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn display_path(path: &str) -> &str {
    if path.is_empty() { "root" } else { path }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_format_takes_precedence() {
        let f = field(json!({"type": "string", "format": "date-time"}));
        assert_eq!(field_column_type(&f, "x").unwrap(), ColumnType::Timestamp);

        let f = field(json!({"type": "integer", "format": "int64"}));
        assert_eq!(field_column_type(&f, "x").unwrap(), ColumnType::String);
    }

    #[test]
    fn test_type_list_picks_first_non_null() {
        let f = field(json!({"type": ["null", "integer"]}));
        assert_eq!(field_column_type(&f, "x").unwrap(), ColumnType::Integer);

        let f = field(json!({"type": []}));
        assert!(field_column_type(&f, "x").is_err());
    }

    #[test]
    fn test_unsupported_type_falls_back_to_string() {
        let f = field(json!({"type": "array", "items": {"type": "integer"}}));
        assert_eq!(field_column_type(&f, "x").unwrap(), ColumnType::String);
    }

    #[test]
    fn test_ref_without_type_is_record() {
        let f = field(json!({"$ref": "#/definitions/A"}));
        assert_eq!(field_column_type(&f, "x").unwrap(), ColumnType::Record);
    }

    #[test]
    fn test_missing_type_names_field() {
        let f = field(json!({"description": "no type"}));
        let err = field_column_type(&f, "outer.inner").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Schema definition error: type not specified for field 'outer.inner': \
             expected one of 'type', 'format' or '$ref'"
        );
    }
}
