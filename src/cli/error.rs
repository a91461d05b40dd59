//! CLI error types

use std::path::PathBuf;

use thiserror::Error;

use crate::convert::ConversionError;

/// Errors surfaced to the operator; each maps to exit status 1
#[derive(Error, Debug)]
pub enum CliError {
    #[error("File reading error: {0:?}: {1}")]
    FileReadError(PathBuf, String),

    #[error("Input parsing error: {0}")]
    ParseError(String),

    #[error("Schema conversion error: {0}")]
    Conversion(#[from] ConversionError),

    #[error("Output serialization error: {0}")]
    SerializationError(String),
}
