//! CLI error types and result alias.

use connstr_core::ConnectionError;
use miette::Diagnostic;
use thiserror::Error;

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    #[diagnostic(code(connstr::cli::config))]
    Config(String),

    /// Parsing or config loading failed in the library
    #[error(transparent)]
    #[diagnostic(transparent)]
    Connection(#[from] ConnectionError),

    /// Output serialization error
    #[error("Output error: {0}")]
    #[diagnostic(code(connstr::output))]
    Output(String),
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Output(format!("Failed to serialize JSON: {}", err))
    }
}
