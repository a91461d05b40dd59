//! Output formatting for CLI

use serde::Serialize;

use super::error::CliError;

/// Rendering of the converted document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON, 2-space indentation
    #[default]
    Json,
    Yaml,
}

/// Render a converted document for stdout
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(value).map_err(|e| {
            CliError::SerializationError(format!("Failed to serialize to JSON: {}", e))
        }),
        OutputFormat::Yaml => serde_yaml::to_string(value).map_err(|e| {
            CliError::SerializationError(format!("Failed to serialize to YAML: {}", e))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_json_indentation() {
        let rendered = render(&json!({"a": [1]}), OutputFormat::Json).unwrap();
        assert_eq!(rendered, "{\n  \"a\": [\n    1\n  ]\n}");
    }

    #[test]
    fn test_render_yaml() {
        let rendered = render(&json!({"name": "id", "type": "INTEGER"}), OutputFormat::Yaml).unwrap();
        assert_eq!(rendered, "name: id\ntype: INTEGER\n");
    }
}
