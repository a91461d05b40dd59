//! Convert command implementation

use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde_json::Value;

use crate::cli::error::CliError;
use crate::cli::output::{OutputFormat, render};
use crate::convert::ConversionConfig;
use crate::export::json_schema::{JsonSchemaExporter, parse_columns};
use crate::import::json_schema::JsonSchemaImporter;

/// Conversion direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// JSON Schema document → column list
    JsonToGbq,
    /// Column list → JSON Schema document
    GbqToJson,
}

/// Where the input document comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Document passed inline as an argument
    Inline(String),
    /// Path to a file, or `-` for stdin
    File(PathBuf),
}

/// Arguments for the convert command
#[derive(Debug, Clone)]
pub struct ConvertArgs {
    pub direction: Direction,
    pub source: InputSource,
    pub output: OutputFormat,
    pub config: ConversionConfig,
}

/// Load input content from an inline argument, a file or stdin
pub fn load_input(source: &InputSource) -> Result<String, CliError> {
    match source {
        InputSource::Inline(content) => Ok(content.clone()),
        InputSource::File(path) if path.as_os_str() == "-" => {
            read_stream(std::io::stdin().lock(), path)
        }
        InputSource::File(path) => std::fs::read_to_string(path)
            .map_err(|e| CliError::FileReadError(path.clone(), e.to_string())),
    }
}

/// Read a whole stream, reporting failures against `path`
fn read_stream(mut reader: impl Read, path: &Path) -> Result<String, CliError> {
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .map_err(|e| CliError::FileReadError(path.to_path_buf(), e.to_string()))?;
    Ok(content)
}

/// Parse JSON or YAML content into a document tree
///
/// Content starting with `{` or `[` is read as JSON, anything else as YAML.
pub fn parse_input(content: &str) -> Result<Value, CliError> {
    let trimmed = content.trim_start();
    if trimmed.is_empty() {
        return Err(CliError::ParseError("input is empty".to_string()));
    }

    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        serde_json::from_str(content)
            .map_err(|e| CliError::ParseError(format!("Failed to parse JSON: {}", e)))
    } else {
        serde_yaml::from_str(content)
            .map_err(|e| CliError::ParseError(format!("Failed to parse YAML: {}", e)))
    }
}

/// Convert a parsed document in the given direction
pub fn convert_document(
    document: &Value,
    direction: Direction,
    config: &ConversionConfig,
) -> Result<Value, CliError> {
    let converted = match direction {
        Direction::JsonToGbq => {
            let columns = JsonSchemaImporter::with_config(config.clone()).import(document)?;
            serde_json::to_value(columns).map_err(|e| {
                CliError::SerializationError(format!("Failed to serialize columns: {}", e))
            })?
        }
        Direction::GbqToJson => {
            let columns = parse_columns(document, config)?;
            JsonSchemaExporter::with_config(config.clone()).export(&columns)?
        }
    };
    Ok(converted)
}

/// Handle the convert command, returning the rendered output
pub fn handle_convert(args: &ConvertArgs) -> Result<String, CliError> {
    let content = load_input(&args.source)?;
    let document = parse_input(&content)?;

    let started = Instant::now();
    let converted = convert_document(&document, args.direction, &args.config)?;
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

    tracing::info!("Output ({:.2} ms elapsed):  SUCCESS", elapsed_ms);
    render(&converted, args.output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::ConversionError;
    use serde_json::json;
    use std::io::Write;

    fn args(direction: Direction, source: InputSource) -> ConvertArgs {
        ConvertArgs {
            direction,
            source,
            output: OutputFormat::Json,
            config: ConversionConfig::default(),
        }
    }

    #[test]
    fn test_parse_input_detects_format() {
        assert_eq!(
            parse_input(r#"{"properties": {}}"#).unwrap(),
            json!({"properties": {}})
        );
        assert_eq!(
            parse_input("properties:\n  id:\n    type: integer\n").unwrap(),
            json!({"properties": {"id": {"type": "integer"}}})
        );
        assert!(matches!(parse_input("{not json"), Err(CliError::ParseError(_))));
        assert!(matches!(parse_input("   "), Err(CliError::ParseError(_))));
    }

    #[test]
    fn test_yaml_input_keeps_order() {
        let document = parse_input("properties:\n  b: {type: string}\n  a: {type: string}\n").unwrap();
        let keys: Vec<&String> = document["properties"].as_object().unwrap().keys().collect();
        assert_eq!(keys, ["b", "a"]);
    }

    #[test]
    fn test_load_input_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"properties": {{"id": {{"type": "integer"}}}}}}"#).unwrap();

        let content = load_input(&InputSource::File(file.path().to_path_buf())).unwrap();
        assert!(content.contains("\"id\""));
    }

    #[test]
    fn test_stream_read_failure_is_file_read_error() {
        let err = read_stream(&[0xff, 0xfe][..], Path::new("-")).unwrap_err();
        assert!(matches!(&err, CliError::FileReadError(path, _) if path.as_os_str() == "-"));
        assert!(err.to_string().starts_with("File reading error: \"-\""));

        assert_eq!(read_stream(&b"{}"[..], Path::new("-")).unwrap(), "{}");
    }

    #[test]
    fn test_load_input_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");

        let err = load_input(&InputSource::File(missing.clone())).unwrap_err();
        assert!(matches!(err, CliError::FileReadError(path, _) if path == missing));
    }

    #[test]
    fn test_handle_json_to_gbq() {
        let source = InputSource::Inline(
            r#"{"properties": {"id": {"type": "integer"}}, "required": ["id"]}"#.to_string(),
        );
        let output = handle_convert(&args(Direction::JsonToGbq, source)).unwrap();

        let parsed: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(
            parsed,
            json!([{"name": "id", "type": "INTEGER", "mode": "REQUIRED"}])
        );
    }

    #[test]
    fn test_handle_gbq_to_json_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"name": "ts", "type": "TIMESTAMP", "mode": "REQUIRED", "description": "event time"}}]"#
        )
        .unwrap();

        let output =
            handle_convert(&args(Direction::GbqToJson, InputSource::File(file.path().into())))
                .unwrap();
        let parsed: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(
            parsed,
            json!({
                "properties": {
                    "ts": {"format": "date-time", "description": "event time"}
                },
                "required": ["ts"]
            })
        );
    }

    #[test]
    fn test_conversion_errors_are_wrapped() {
        let source = InputSource::Inline(r#"{"properties": {"x": {}}}"#.to_string());
        let err = handle_convert(&args(Direction::JsonToGbq, source)).unwrap_err();
        assert!(matches!(
            err,
            CliError::Conversion(ConversionError::SchemaDefinition(_))
        ));
        assert!(err.to_string().starts_with("Schema conversion error: "));

        let source = InputSource::Inline(r#"[{"name": "g", "type": "GEOGRAPHY"}]"#.to_string());
        let err = handle_convert(&args(Direction::GbqToJson, source)).unwrap_err();
        assert!(matches!(
            err,
            CliError::Conversion(ConversionError::UnknownColumnType(_))
        ));
    }
}
