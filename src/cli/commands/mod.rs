//! CLI command implementations

pub mod convert;

pub use convert::{ConvertArgs, Direction, InputSource, handle_convert};
