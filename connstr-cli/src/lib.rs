//! connstr CLI - command-line interface for the connstr library.
//!
//! Parses connection strings, applies defaults from `connstr.toml` and
//! prints either a breakdown or the canonical rendering.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
