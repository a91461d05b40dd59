//! Column model for the converter

use super::enums::{ColumnMode, ColumnType};
use serde::{Deserialize, Serialize};

/// Column descriptor in a warehouse table schema
///
/// `fields` is present if and only if `column_type` is [`ColumnType::Record`];
/// the constructors below keep that invariant. `description` is omitted from
/// the serialized form when there is none.
///
/// # Example
///
/// ```rust
/// use gbqschema_converter::models::{Column, ColumnMode, ColumnType};
///
/// let id = Column::new("id", ColumnType::Integer).with_mode(ColumnMode::Required);
/// let address = Column::record("address", vec![Column::new("city", ColumnType::String)]);
///
/// assert!(id.fields.is_none());
/// assert_eq!(address.fields.as_ref().map(Vec::len), Some(1));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Column {
    /// Column name
    pub name: String,
    /// Warehouse column type
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    /// Nullability mode (default: NULLABLE)
    #[serde(default)]
    pub mode: ColumnMode,
    /// Column description/documentation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Nested columns of a RECORD column
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<Column>>,
}

impl Column {
    /// Create a nullable column of the given type
    ///
    /// A RECORD column created this way starts with an empty field list.
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            mode: ColumnMode::Nullable,
            description: None,
            fields: column_type.is_record().then(Vec::new),
        }
    }

    /// Create a nullable RECORD column holding `fields`
    pub fn record(name: impl Into<String>, fields: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            column_type: ColumnType::Record,
            mode: ColumnMode::Nullable,
            description: None,
            fields: Some(fields),
        }
    }

    pub fn with_mode(mut self, mode: ColumnMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn is_required(&self) -> bool {
        self.mode == ColumnMode::Required
    }

    /// Nested columns, empty for non-RECORD columns
    pub fn nested(&self) -> &[Column] {
        self.fields.as_deref().unwrap_or(&[])
    }
}
