//! CLI module for the gbqschema-converter binary
//!
//! Boundary layer around the pure converters: reads input from an inline
//! argument, a file or stdin, parses it, renders the result and reports
//! failures. Only this layer touches I/O or installs a log subscriber.

pub mod commands;
pub mod error;
pub mod logging;
pub mod output;

pub use error::CliError;
