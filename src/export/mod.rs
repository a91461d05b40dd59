//! Export functionality
//!
//! Turns warehouse column schemas back into JSON Schema documents.

pub mod json_schema;

// Re-export for convenience
pub use json_schema::{JsonSchemaExporter, parse_columns};
