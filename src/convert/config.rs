//! Configuration for schema conversion

use serde::{Deserialize, Serialize};

use super::ConversionError;

/// Configuration shared by both conversion directions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionConfig {
    /// Optional cap on RECORD nesting depth. Nesting is unbounded when
    /// unset; `$ref` cycles are rejected regardless.
    pub max_depth: Option<usize>,

    /// Chase a definition that is itself a `$ref` until a concrete schema is
    /// reached. When disabled a reference is resolved exactly one level.
    pub follow_chained_refs: bool,

    /// Check the input document against the JSON Schema meta-schema before
    /// conversion (requires the `schema-validation` feature)
    pub validate_meta_schema: bool,

    /// Emit `"type": "string"` alongside the `format` tag for DATE and
    /// TIMESTAMP columns. Off by default, so a bare `{"format": "date"}`
    /// field converts back to itself.
    pub inline_date_types: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            follow_chained_refs: false,
            validate_meta_schema: true,
            inline_date_types: false,
        }
    }
}

impl ConversionConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom configuration
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder::default()
    }

    pub(crate) fn check_depth(&self, depth: usize) -> Result<(), ConversionError> {
        check_depth(depth, self.max_depth)
    }
}

pub(crate) fn check_depth(depth: usize, max_depth: Option<usize>) -> Result<(), ConversionError> {
    match max_depth {
        Some(max) if depth > max => Err(ConversionError::MaxDepthExceeded { depth, max }),
        _ => Ok(()),
    }
}

/// Builder for ConversionConfig
#[derive(Debug, Default)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    /// Cap the nesting depth (at least 1)
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = Some(depth.max(1));
        self
    }

    pub fn unbounded_depth(mut self) -> Self {
        self.config.max_depth = None;
        self
    }

    pub fn follow_chained_refs(mut self, follow: bool) -> Self {
        self.config.follow_chained_refs = follow;
        self
    }

    pub fn validate_meta_schema(mut self, validate: bool) -> Self {
        self.config.validate_meta_schema = validate;
        self
    }

    pub fn inline_date_types(mut self, inline: bool) -> Self {
        self.config.inline_date_types = inline;
        self
    }

    /// Build the configuration
    pub fn build(self) -> ConversionConfig {
        self.config
    }
}
