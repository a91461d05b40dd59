//! gbqschema-converter CLI
//!
//! ```text
//! gbqschema-converter json-to-gbq -f schema.json
//! gbqschema-converter gbq-to-json -i '[{"name": "id", "type": "INTEGER", "mode": "REQUIRED"}]'
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use gbqschema_converter::ConversionConfig;
use gbqschema_converter::cli::commands::{ConvertArgs, Direction, InputSource, handle_convert};
use gbqschema_converter::cli::logging::init_logging;
use gbqschema_converter::cli::output::OutputFormat;

/// Google BigQuery Table Schema Converter
#[derive(Parser, Debug)]
#[command(name = "gbqschema-converter", version, about, long_about = None)]
struct Cli {
    /// Log debug output (per-property processing) to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a JSON Schema document into a BigQuery column schema
    JsonToGbq(ConvertOptions),
    /// Convert a BigQuery column schema into a JSON Schema document
    GbqToJson(ConvertOptions),
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct InputOptions {
    /// Input object as string
    #[arg(short, long)]
    input: Option<String>,

    /// Input object as file path ('-' for stdin)
    #[arg(short, long)]
    file: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ConvertOptions {
    #[command(flatten)]
    input: InputOptions,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    output: OutputFormat,

    /// Cap RECORD nesting depth (unbounded by default)
    #[arg(long)]
    max_depth: Option<usize>,

    /// Follow `$ref` chains through definitions that are themselves references
    #[arg(long)]
    follow_chained_refs: bool,

    /// Skip the JSON Schema meta-schema check
    #[arg(long)]
    no_meta_validation: bool,

    /// Emit `"type": "string"` next to the DATE/TIMESTAMP `format` tag
    #[arg(long)]
    inline_date_types: bool,
}

impl ConvertOptions {
    fn into_args(self, direction: Direction) -> ConvertArgs {
        let source = match (self.input.input, self.input.file) {
            (Some(inline), _) => InputSource::Inline(inline),
            (None, Some(path)) => InputSource::File(path),
            (None, None) => InputSource::File(PathBuf::from("-")),
        };

        let mut builder = ConversionConfig::builder()
            .follow_chained_refs(self.follow_chained_refs)
            .validate_meta_schema(!self.no_meta_validation)
            .inline_date_types(self.inline_date_types);
        if let Some(depth) = self.max_depth {
            builder = builder.max_depth(depth);
        }
        let config = builder.build();

        ConvertArgs {
            direction,
            source,
            output: self.output,
            config,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let args = match cli.command {
        Command::JsonToGbq(options) => options.into_args(Direction::JsonToGbq),
        Command::GbqToJson(options) => options.into_args(Direction::GbqToJson),
    };

    match handle_convert(&args) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
