//! JSON Schema exporter
//!
//! Converts warehouse column descriptors back into a JSON Schema document.
//! Nested RECORD columns are always inlined as object schemas; no
//! `definitions` section is produced.

use serde_json::{Map, Value, json};

use crate::convert::type_map::json_type_of;
use crate::convert::{ConversionConfig, ConversionError, check_depth};
use crate::models::{Column, ColumnMode, ColumnType};
use crate::validation::schema::value_kind;

/// JSON Schema Exporter
#[derive(Debug, Default)]
pub struct JsonSchemaExporter {
    config: ConversionConfig,
}

impl JsonSchemaExporter {
    /// Create a new JsonSchemaExporter with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ConversionConfig) -> Self {
        Self { config }
    }

    /// Export columns as a JSON Schema document
    ///
    /// The top-level document carries only `properties` and, when at least
    /// one column is REQUIRED, `required`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use gbqschema_converter::export::JsonSchemaExporter;
    /// use gbqschema_converter::models::{Column, ColumnMode, ColumnType};
    /// use serde_json::json;
    ///
    /// let columns = vec![
    ///     Column::new("id", ColumnType::Integer).with_mode(ColumnMode::Required),
    ///     Column::record("tags", vec![Column::new("label", ColumnType::String)]),
    /// ];
    ///
    /// let schema = JsonSchemaExporter::new().export(&columns).unwrap();
    /// assert_eq!(
    ///     schema,
    ///     json!({
    ///         "properties": {
    ///             "id": {"type": "integer"},
    ///             "tags": {"type": "object", "properties": {"label": {"type": "string"}}}
    ///         },
    ///         "required": ["id"]
    ///     })
    /// );
    /// ```
    pub fn export(&self, columns: &[Column]) -> Result<Value, ConversionError> {
        let document = self.object_schema(columns, 0)?;
        tracing::debug!(columns = columns.len(), "Built JSON Schema");
        Ok(Value::Object(document))
    }

    /// `properties`/`required` pair for a column list
    fn object_schema(
        &self,
        columns: &[Column],
        depth: usize,
    ) -> Result<Map<String, Value>, ConversionError> {
        self.config.check_depth(depth)?;

        let mut properties = Map::new();
        let mut modes: Map<String, Value> = Map::new();

        for column in columns {
            tracing::debug!(column = %column.name, column_type = %column.column_type, "Processing column");

            properties.insert(column.name.clone(), self.property(column, depth)?);
            modes.insert(column.name.clone(), Value::Bool(column.is_required()));
        }

        // A later duplicate replaces both the property and its mode
        let required: Vec<Value> = modes
            .into_iter()
            .filter(|(_, required)| required.as_bool() == Some(true))
            .map(|(name, _)| Value::String(name))
            .collect();

        let mut schema = Map::new();
        schema.insert("properties".to_string(), Value::Object(properties));
        if !required.is_empty() {
            schema.insert("required".to_string(), Value::Array(required));
        }
        Ok(schema)
    }

    /// Field schema for one column
    fn property(&self, column: &Column, depth: usize) -> Result<Value, ConversionError> {
        let json_type = json_type_of(column.column_type);
        let mut property = Map::new();

        if column.column_type.is_record() {
            property.insert("type".to_string(), json!(json_type.as_str()));
            if let Some(description) = &column.description {
                property.insert("description".to_string(), json!(description));
            }
            property.extend(self.object_schema(column.nested(), depth + 1)?);
            return Ok(Value::Object(property));
        }

        if json_type.is_format() {
            if self.config.inline_date_types {
                property.insert("type".to_string(), json!("string"));
            }
            property.insert("format".to_string(), json!(json_type.as_str()));
        } else {
            property.insert("type".to_string(), json!(json_type.as_str()));
        }
        if let Some(description) = &column.description {
            property.insert("description".to_string(), json!(description));
        }

        Ok(Value::Object(property))
    }
}

/// Parse a column list from its JSON representation
///
/// Unlike deserializing with serde, this reports unknown types and modes
/// as distinct [`ConversionError`] kinds and accepts the standard SQL type
/// aliases in any case.
pub fn parse_columns(
    value: &Value,
    config: &ConversionConfig,
) -> Result<Vec<Column>, ConversionError> {
    parse_column_list(value, "", 0, config.max_depth)
}

fn parse_column_list(
    value: &Value,
    path: &str,
    depth: usize,
    max_depth: Option<usize>,
) -> Result<Vec<Column>, ConversionError> {
    check_depth(depth, max_depth)?;

    let items = value.as_array().ok_or_else(|| {
        ConversionError::InvalidColumn(format!(
            "column list{} must be an array, found {}",
            at(path),
            value_kind(value)
        ))
    })?;

    items
        .iter()
        .enumerate()
        .map(|(idx, item)| parse_column(item, idx, path, depth, max_depth))
        .collect()
}

fn parse_column(
    value: &Value,
    idx: usize,
    path: &str,
    depth: usize,
    max_depth: Option<usize>,
) -> Result<Column, ConversionError> {
    let obj = value.as_object().ok_or_else(|| {
        ConversionError::InvalidColumn(format!(
            "column {}{} must be an object, found {}",
            idx,
            at(path),
            value_kind(value)
        ))
    })?;

    let name = obj.get("name").and_then(Value::as_str).ok_or_else(|| {
        ConversionError::InvalidColumn(format!("column {}{} has no 'name'", idx, at(path)))
    })?;
    let column_path = if path.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", path, name)
    };

    let column_type = obj
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            ConversionError::InvalidColumn(format!("column '{}' has no 'type'", column_path))
        })?
        .parse::<ColumnType>()
        .map_err(ConversionError::UnknownColumnType)?;

    let mode = match obj.get("mode") {
        None | Some(Value::Null) => ColumnMode::Nullable,
        Some(Value::String(mode)) => mode
            .parse::<ColumnMode>()
            .map_err(ConversionError::UnknownColumnMode)?,
        Some(other) => {
            return Err(ConversionError::InvalidColumn(format!(
                "'mode' of column '{}' must be a string, found {}",
                column_path,
                value_kind(other)
            )));
        }
    };

    let description = match obj.get("description") {
        None | Some(Value::Null) => None,
        Some(Value::String(description)) => Some(description.clone()),
        Some(other) => {
            return Err(ConversionError::InvalidColumn(format!(
                "'description' of column '{}' must be a string, found {}",
                column_path,
                value_kind(other)
            )));
        }
    };

    let column = if column_type.is_record() {
        let fields = obj.get("fields").ok_or_else(|| {
            ConversionError::InvalidColumn(format!(
                "RECORD column '{}' has no 'fields'",
                column_path
            ))
        })?;
        Column::record(
            name,
            parse_column_list(fields, &column_path, depth + 1, max_depth)?,
        )
    } else {
        if obj.contains_key("fields") {
            tracing::warn!(
                column = %column_path,
                "Ignoring 'fields' on non-RECORD column of type {}",
                column_type
            );
        }
        Column::new(name, column_type)
    };

    Ok(column.with_mode(mode).with_description(description))
}

fn at(path: &str) -> String {
    if path.is_empty() {
        String::new()
    } else {
        format!(" of '{}'", path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_columns_with_aliases() {
        let columns = parse_columns(
            &json!([
                {"name": "a", "type": "int64", "mode": "required"},
                {"name": "b", "type": "STRUCT", "fields": [{"name": "c", "type": "BOOL"}]}
            ]),
            &ConversionConfig::default(),
        )
        .unwrap();

        assert_eq!(columns[0].column_type, ColumnType::Integer);
        assert_eq!(columns[0].mode, ColumnMode::Required);
        assert_eq!(columns[1].column_type, ColumnType::Record);
        assert_eq!(columns[1].nested()[0].column_type, ColumnType::Boolean);
    }

    #[test]
    fn test_parse_columns_errors() {
        let config = ConversionConfig::default();

        assert_eq!(
            parse_columns(&json!([{"name": "g", "type": "GEOGRAPHY"}]), &config).unwrap_err(),
            ConversionError::UnknownColumnType("GEOGRAPHY".to_string())
        );
        assert_eq!(
            parse_columns(
                &json!([{"name": "r", "type": "STRING", "mode": "REPEATED"}]),
                &config
            )
            .unwrap_err(),
            ConversionError::UnknownColumnMode("REPEATED".to_string())
        );
        assert!(matches!(
            parse_columns(&json!([{"type": "STRING"}]), &config),
            Err(ConversionError::InvalidColumn(_))
        ));
        assert!(matches!(
            parse_columns(&json!({"name": "x"}), &config),
            Err(ConversionError::InvalidColumn(_))
        ));
    }

    #[test]
    fn test_record_requires_fields() {
        let err = parse_columns(
            &json!([{"name": "outer", "type": "RECORD", "fields": [{"name": "inner", "type": "RECORD"}]}]),
            &ConversionConfig::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ConversionError::InvalidColumn("RECORD column 'outer.inner' has no 'fields'".to_string())
        );
    }

    #[test]
    fn test_date_types_as_bare_format() {
        let schema = JsonSchemaExporter::new()
            .export(&[
                Column::new("d", ColumnType::Date),
                Column::new("ts", ColumnType::Timestamp),
            ])
            .unwrap();

        assert_eq!(
            schema,
            json!({"properties": {"d": {"format": "date"}, "ts": {"format": "date-time"}}})
        );
    }

    #[test]
    fn test_date_types_with_inline_string() {
        let config = ConversionConfig::builder().inline_date_types(true).build();
        let schema = JsonSchemaExporter::with_config(config)
            .export(&[Column::new("ts", ColumnType::Timestamp)])
            .unwrap();

        assert_eq!(
            schema,
            json!({"properties": {"ts": {"type": "string", "format": "date-time"}}})
        );
    }

    #[test]
    fn test_duplicate_names_last_write_wins() {
        let schema = JsonSchemaExporter::new()
            .export(&[
                Column::new("a", ColumnType::String).with_mode(ColumnMode::Required),
                Column::new("a", ColumnType::Integer).with_mode(ColumnMode::Required),
            ])
            .unwrap();

        assert_eq!(
            schema,
            json!({"properties": {"a": {"type": "integer"}}, "required": ["a"]})
        );
    }

    #[test]
    fn test_duplicate_name_nullable_wins_over_required() {
        let schema = JsonSchemaExporter::new()
            .export(&[
                Column::new("a", ColumnType::String).with_mode(ColumnMode::Required),
                Column::new("b", ColumnType::String).with_mode(ColumnMode::Required),
                Column::new("a", ColumnType::Integer),
            ])
            .unwrap();

        assert_eq!(
            schema,
            json!({
                "properties": {"a": {"type": "integer"}, "b": {"type": "string"}},
                "required": ["b"]
            })
        );
    }

    #[test]
    fn test_duplicate_name_required_keeps_first_position() {
        let schema = JsonSchemaExporter::new()
            .export(&[
                Column::new("a", ColumnType::String),
                Column::new("b", ColumnType::String).with_mode(ColumnMode::Required),
                Column::new("a", ColumnType::String).with_mode(ColumnMode::Required),
            ])
            .unwrap();

        assert_eq!(schema["required"], json!(["a", "b"]));
    }
}
