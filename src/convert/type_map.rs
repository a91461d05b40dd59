//! Type-mapping table between JSON Schema and warehouse column types
//!
//! | JSON Schema type/format   | Column type |
//! |---------------------------|-------------|
//! | `integer`                 | INTEGER     |
//! | `number`                  | FLOAT       |
//! | `boolean`                 | BOOLEAN     |
//! | `string`                  | STRING      |
//! | `date`                    | DATE        |
//! | `date-time` (format only) | TIMESTAMP   |
//! | `object` / `$ref`         | RECORD      |
//!
//! Both directions are exhaustive matches, so adding a variant to either
//! enumeration fails to compile until the table is extended.

use crate::models::{ColumnType, JsonType};

/// Forward lookup
pub fn column_type_of(json_type: JsonType) -> ColumnType {
    match json_type {
        JsonType::Integer => ColumnType::Integer,
        JsonType::Number => ColumnType::Float,
        JsonType::Boolean => ColumnType::Boolean,
        JsonType::String => ColumnType::String,
        JsonType::Date => ColumnType::Date,
        JsonType::DateTime => ColumnType::Timestamp,
        JsonType::Object => ColumnType::Record,
    }
}

/// Reverse lookup
pub fn json_type_of(column_type: ColumnType) -> JsonType {
    match column_type {
        ColumnType::Integer => JsonType::Integer,
        ColumnType::Float => JsonType::Number,
        ColumnType::Boolean => JsonType::Boolean,
        ColumnType::String => JsonType::String,
        ColumnType::Date => JsonType::Date,
        ColumnType::Timestamp => JsonType::DateTime,
        ColumnType::Record => JsonType::Object,
    }
}

/// Column type for a `format` keyword value; unknown formats are STRING
pub fn column_type_for_format(format: &str) -> ColumnType {
    JsonType::from_format_name(format)
        .map(column_type_of)
        .unwrap_or(ColumnType::String)
}

/// Column type for a `type` keyword value; `None` if the name is not in the table
pub fn column_type_for_type(type_name: &str) -> Option<ColumnType> {
    JsonType::from_type_name(type_name).map(column_type_of)
}
