//! CLI command implementations.

pub mod format;
pub mod parse;
pub mod version;
