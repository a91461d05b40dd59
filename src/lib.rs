//! GBQ Schema Converter - JSON Schema ⇄ warehouse column schema
//!
//! Provides:
//! - Forward conversion of a JSON Schema document into an ordered list of
//!   typed columns with nullability modes (nested objects become RECORD
//!   columns, `$ref`s are resolved against `definitions`)
//! - Reverse conversion of a column list into a JSON Schema document
//! - A validation gate that rejects malformed JSON Schema before conversion
//!
//! The core is pure: no I/O, no global state. The `cli` feature adds the
//! `gbqschema-converter` binary that reads input, logs and prints results.

pub mod convert;
pub mod export;
pub mod import;
pub mod models;
pub mod validation;

#[cfg(feature = "cli")]
pub mod cli;

// Re-export commonly used types
pub use convert::{
    ConversionConfig, ConversionConfigBuilder, ConversionError, ErrorKind, to_column_schema,
    to_json_schema,
};
pub use export::JsonSchemaExporter;
pub use import::JsonSchemaImporter;
pub use models::{Column, ColumnMode, ColumnType, JsonType};
pub use validation::validate_json_schema;
