//! Conversion entry points and errors
//!
//! [`to_column_schema`] runs the forward direction (JSON Schema → columns),
//! [`to_json_schema`] the reverse one. Both are pure functions of their input:
//! no I/O, no global state, and either the whole result or a typed error.

mod config;
pub mod type_map;

pub use config::{ConversionConfig, ConversionConfigBuilder};
pub(crate) use config::check_depth;

use serde_json::Value;
use thiserror::Error;

use crate::export::json_schema::{JsonSchemaExporter, parse_columns};
use crate::import::json_schema::JsonSchemaImporter;
use crate::models::Column;

/// Errors raised while converting between the two schema representations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// Input JSON Schema is structurally invalid
    #[error("Schema definition error: {0}")]
    SchemaDefinition(String),

    /// A `$ref` could not be resolved against the document's definitions
    #[error("Cannot resolve reference '{reference}': {reason}")]
    ReferenceResolution { reference: String, reason: String },

    /// A chain of `$ref`s leads back to a definition that is being expanded
    #[error("Circular reference detected: {0}")]
    CircularReference(String),

    /// RECORD nesting deeper than the configured limit
    #[error("Maximum nesting depth exceeded: {depth} > {max}")]
    MaxDepthExceeded { depth: usize, max: usize },

    /// Column descriptor with a type outside the warehouse type set
    #[error("Unknown column type '{0}'")]
    UnknownColumnType(String),

    /// Column descriptor with a mode other than NULLABLE/REQUIRED
    #[error("Unknown column mode '{0}'")]
    UnknownColumnMode(String),

    /// Column descriptor that is missing or mistypes a field
    #[error("Invalid column: {0}")]
    InvalidColumn(String),
}

/// Broad error category, for callers that only need to branch on the kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    SchemaDefinition,
    ReferenceResolution,
    Conversion,
}

impl ConversionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConversionError::SchemaDefinition(_) | ConversionError::MaxDepthExceeded { .. } => {
                ErrorKind::SchemaDefinition
            }
            ConversionError::ReferenceResolution { .. } | ConversionError::CircularReference(_) => {
                ErrorKind::ReferenceResolution
            }
            ConversionError::UnknownColumnType(_)
            | ConversionError::UnknownColumnMode(_)
            | ConversionError::InvalidColumn(_) => ErrorKind::Conversion,
        }
    }

    pub(crate) fn unresolved(reference: &str, reason: impl Into<String>) -> Self {
        ConversionError::ReferenceResolution {
            reference: reference.to_string(),
            reason: reason.into(),
        }
    }
}

/// Convert a parsed JSON Schema document into an ordered column list
///
/// # Example
///
/// ```rust
/// use gbqschema_converter::to_column_schema;
/// use serde_json::json;
///
/// let columns = to_column_schema(&json!({
///     "properties": {
///         "id": {"type": "integer"},
///         "name": {"type": "string", "description": "full name"}
///     },
///     "required": ["id"]
/// }))
/// .unwrap();
///
/// assert_eq!(
///     serde_json::to_value(&columns).unwrap(),
///     json!([
///         {"name": "id", "type": "INTEGER", "mode": "REQUIRED"},
///         {"name": "name", "type": "STRING", "mode": "NULLABLE", "description": "full name"}
///     ])
/// );
/// ```
pub fn to_column_schema(document: &Value) -> Result<Vec<Column>, ConversionError> {
    JsonSchemaImporter::new().import(document)
}

/// Convert a column list (as parsed JSON) into a JSON Schema document
///
/// # Example
///
/// ```rust
/// use gbqschema_converter::to_json_schema;
/// use serde_json::json;
///
/// let document = to_json_schema(&json!([
///     {"name": "id", "type": "INTEGER", "mode": "REQUIRED"}
/// ]))
/// .unwrap();
///
/// assert_eq!(
///     document,
///     json!({"properties": {"id": {"type": "integer"}}, "required": ["id"]})
/// );
/// ```
pub fn to_json_schema(columns: &Value) -> Result<Value, ConversionError> {
    let config = ConversionConfig::default();
    let columns = parse_columns(columns, &config)?;
    JsonSchemaExporter::with_config(config).export(&columns)
}
