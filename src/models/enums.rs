//! Enumerations shared by the column model and the type-mapping table

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Warehouse column type
///
/// Serialized in upper case (`"INTEGER"`, `"RECORD"`, ...) to match the
/// warehouse's JSON representation of a table schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ColumnType {
    Integer,
    Float,
    Boolean,
    String,
    Date,
    Timestamp,
    /// Nested structure; the only type that carries `fields`
    Record,
}

impl ColumnType {
    /// All column types, in table order
    pub const ALL: [ColumnType; 7] = [
        ColumnType::Integer,
        ColumnType::Float,
        ColumnType::Boolean,
        ColumnType::String,
        ColumnType::Date,
        ColumnType::Timestamp,
        ColumnType::Record,
    ];

    /// Canonical warehouse name
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::Float => "FLOAT",
            ColumnType::Boolean => "BOOLEAN",
            ColumnType::String => "STRING",
            ColumnType::Date => "DATE",
            ColumnType::Timestamp => "TIMESTAMP",
            ColumnType::Record => "RECORD",
        }
    }

    pub fn is_record(&self) -> bool {
        matches!(self, ColumnType::Record)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = String;

    /// Parse a warehouse type name, accepting the standard SQL aliases
    /// (`INT64`, `FLOAT64`, `BOOL`, `STRUCT`, ...) in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "INTEGER" | "INT64" => Ok(ColumnType::Integer),
            "FLOAT" | "FLOAT64" | "NUMERIC" => Ok(ColumnType::Float),
            "BOOLEAN" | "BOOL" => Ok(ColumnType::Boolean),
            "STRING" => Ok(ColumnType::String),
            "DATE" => Ok(ColumnType::Date),
            "TIMESTAMP" | "DATETIME" => Ok(ColumnType::Timestamp),
            "RECORD" | "STRUCT" => Ok(ColumnType::Record),
            _ => Err(s.to_string()),
        }
    }
}

/// Column nullability mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ColumnMode {
    #[default]
    Nullable,
    Required,
}

impl ColumnMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnMode::Nullable => "NULLABLE",
            ColumnMode::Required => "REQUIRED",
        }
    }

    /// Mode for a field, given whether it is listed in `required`
    pub fn from_required(required: bool) -> Self {
        if required {
            ColumnMode::Required
        } else {
            ColumnMode::Nullable
        }
    }
}

impl fmt::Display for ColumnMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "NULLABLE" => Ok(ColumnMode::Nullable),
            "REQUIRED" => Ok(ColumnMode::Required),
            _ => Err(s.to_string()),
        }
    }
}

/// JSON Schema type and format names known to the type-mapping table
///
/// `DateTime` is only reachable through the `format` keyword; `Object` only
/// through the `type` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonType {
    Integer,
    Number,
    Boolean,
    String,
    Date,
    DateTime,
    Object,
}

impl JsonType {
    /// Name used in a JSON Schema document (`type` value or `format` value)
    pub fn as_str(&self) -> &'static str {
        match self {
            JsonType::Integer => "integer",
            JsonType::Number => "number",
            JsonType::Boolean => "boolean",
            JsonType::String => "string",
            JsonType::Date => "date",
            JsonType::DateTime => "date-time",
            JsonType::Object => "object",
        }
    }

    /// Look up a `type` keyword value
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "integer" => Some(JsonType::Integer),
            "number" => Some(JsonType::Number),
            "boolean" => Some(JsonType::Boolean),
            "string" => Some(JsonType::String),
            "date" => Some(JsonType::Date),
            "object" => Some(JsonType::Object),
            _ => None,
        }
    }

    /// Look up a `format` keyword value
    pub fn from_format_name(name: &str) -> Option<Self> {
        match name {
            "date-time" => Some(JsonType::DateTime),
            "object" => None,
            other => JsonType::from_type_name(other),
        }
    }

    /// Whether this name is written under `format` rather than `type`
    pub fn is_format(&self) -> bool {
        matches!(self, JsonType::Date | JsonType::DateTime)
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_type_aliases() {
        assert_eq!("int64".parse::<ColumnType>(), Ok(ColumnType::Integer));
        assert_eq!("FLOAT64".parse::<ColumnType>(), Ok(ColumnType::Float));
        assert_eq!("Bool".parse::<ColumnType>(), Ok(ColumnType::Boolean));
        assert_eq!("struct".parse::<ColumnType>(), Ok(ColumnType::Record));
        assert_eq!("GEOGRAPHY".parse::<ColumnType>(), Err("GEOGRAPHY".to_string()));
    }

    #[test]
    fn test_column_type_display_roundtrip() {
        for ty in ColumnType::ALL {
            assert_eq!(ty.to_string().parse::<ColumnType>(), Ok(ty));
        }
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("required".parse::<ColumnMode>(), Ok(ColumnMode::Required));
        assert_eq!(" NULLABLE ".parse::<ColumnMode>(), Ok(ColumnMode::Nullable));
        assert!("REPEATED".parse::<ColumnMode>().is_err());
        assert_eq!(ColumnMode::default(), ColumnMode::Nullable);
    }

    #[test]
    fn test_format_lookup() {
        assert_eq!(JsonType::from_format_name("date-time"), Some(JsonType::DateTime));
        assert_eq!(JsonType::from_format_name("date"), Some(JsonType::Date));
        assert_eq!(JsonType::from_format_name("object"), None);
        assert_eq!(JsonType::from_type_name("date-time"), None);
        assert_eq!(JsonType::from_format_name("email"), None);
    }
}
