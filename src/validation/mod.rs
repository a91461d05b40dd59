//! Validation functionality
//!
//! Provides the validation gate run before forward conversion.

pub mod schema;

pub use schema::validate_json_schema;
