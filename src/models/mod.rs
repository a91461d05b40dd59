//! Models module for the converter
//!
//! Defines the column descriptor and the enumerations the type-mapping
//! table is built from.

pub mod column;
pub mod enums;

pub use column::Column;
pub use enums::*;
