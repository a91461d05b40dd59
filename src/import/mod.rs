//! Import functionality
//!
//! Builds warehouse column schemas from JSON Schema documents.

pub mod json_schema;
pub mod reference;

// Re-export for convenience
pub use json_schema::JsonSchemaImporter;
pub use reference::{DefinitionRef, DefinitionResolver};
