//! Error types for connection string parsing and configuration loading.

// These warnings are false positives - the fields are used by derive macros
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

/// Result type for connection string operations.
pub type ConnectionResult<T> = Result<T, ConnectionError>;

/// Errors that can occur while parsing connection strings or loading defaults.
///
/// The data model itself never fails: rendering is total. Only parsing,
/// environment expansion and configuration loading produce these.
#[derive(Error, Debug, Diagnostic)]
pub enum ConnectionError {
    /// A character outside the connection string alphabet.
    #[error("Invalid URL character {character:?} at position {position}")]
    #[diagnostic(
        code(connstr::invalid_character),
        help("percent-encode the character, e.g. a space becomes %20")
    )]
    InvalidCharacter { character: char, position: usize },

    /// Malformed host (e.g. an unterminated IPv6 literal).
    #[error("Invalid host: {0}")]
    #[diagnostic(code(connstr::invalid_host))]
    InvalidHost(String),

    /// Port that is not a decimal number in `0..=65535`.
    #[error("Invalid port: {0:?}")]
    #[diagnostic(code(connstr::invalid_port))]
    InvalidPort(String),

    /// Broken percent-encoding or a decoded value that is not UTF-8.
    #[error("Invalid percent-encoding: {0}")]
    #[diagnostic(code(connstr::invalid_encoding))]
    InvalidEncoding(String),

    /// Environment variable not found.
    #[error("Environment variable not found: {0}")]
    #[diagnostic(code(connstr::env_not_found))]
    EnvNotFound(String),

    /// Invalid environment variable value.
    #[error("Invalid environment variable '{name}': {message}")]
    #[diagnostic(code(connstr::invalid_env_value))]
    InvalidEnvValue { name: String, message: String },

    /// Error reading a configuration file.
    #[error("failed to read file: {path}")]
    #[diagnostic(code(connstr::io_error))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    #[diagnostic(code(connstr::config))]
    Config(String),
}

impl ConnectionError {
    /// Shorthand for [`ConnectionError::InvalidHost`].
    pub fn invalid_host(message: impl Into<String>) -> Self {
        Self::InvalidHost(message.into())
    }

    /// Whether the error was caused by the connection string text itself.
    pub fn is_syntax_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidCharacter { .. }
                | Self::InvalidHost(_)
                | Self::InvalidPort(_)
                | Self::InvalidEncoding(_)
        )
    }
}

impl From<toml::de::Error> for ConnectionError {
    fn from(err: toml::de::Error) -> Self {
        ConnectionError::Config(format!("Failed to parse TOML: {}", err))
    }
}
