//! Environment variable expansion for configuration files.
//!
//! Only the braced form is recognised. `$` is a legal character in
//! connection strings (and common in passwords), so a bare `$NAME` is kept
//! verbatim.

use std::collections::HashMap;
use std::iter::Peekable;
use std::str::Chars;

use crate::error::{ConnectionError, ConnectionResult};

/// Source for environment variables.
pub trait EnvSource: Send + Sync {
    /// Get an environment variable value.
    fn get(&self, name: &str) -> Option<String>;
}

/// Process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdEnvSource;

impl EnvSource for StdEnvSource {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Environment source backed by a HashMap.
#[derive(Debug, Clone, Default)]
pub struct MapEnvSource {
    vars: HashMap<String, String>,
}

impl MapEnvSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl EnvSource for MapEnvSource {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

/// Expands `${...}` references.
///
/// Supported syntax:
/// - `${VAR}` - required variable
/// - `${VAR:-default}` - variable with default value
/// - `${VAR:?error message}` - required with custom error
///
/// ```rust
/// use connstr_core::env::{EnvExpander, MapEnvSource};
///
/// let expander = EnvExpander::with_source(MapEnvSource::new().set("DB_HOST", "db.local"));
/// let url = expander.expand("postgres://${DB_HOST}/app?key=$literal").unwrap();
/// assert_eq!(url, "postgres://db.local/app?key=$literal");
/// ```
#[derive(Debug, Clone)]
pub struct EnvExpander<S: EnvSource = StdEnvSource> {
    source: S,
}

impl EnvExpander<StdEnvSource> {
    /// Create an expander over the process environment.
    pub fn new() -> Self {
        Self {
            source: StdEnvSource,
        }
    }
}

impl Default for EnvExpander<StdEnvSource> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EnvSource> EnvExpander<S> {
    /// Create an expander with a custom environment source.
    pub fn with_source(source: S) -> Self {
        Self { source }
    }

    /// Expand every `${...}` reference in `input`.
    pub fn expand(&self, input: &str) -> ConnectionResult<String> {
        let mut result = String::with_capacity(input.len());
        let mut chars = input.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '$' && chars.peek() == Some(&'{') {
                chars.next();
                result.push_str(&self.expand_braced(&mut chars)?);
            } else {
                result.push(c);
            }
        }

        Ok(result)
    }

    fn expand_braced(&self, chars: &mut Peekable<Chars<'_>>) -> ConnectionResult<String> {
        let mut name = String::new();
        let mut modifier = None;
        let mut modifier_value = String::new();
        let mut closed = false;

        while let Some(c) = chars.next() {
            if c == '}' {
                closed = true;
                break;
            } else if c == ':' && modifier.is_none() {
                modifier = chars.next();
            } else if modifier.is_some() {
                modifier_value.push(c);
            } else {
                name.push(c);
            }
        }

        if !closed {
            return Err(ConnectionError::InvalidEnvValue {
                name,
                message: "Unterminated variable reference".to_string(),
            });
        }

        if name.is_empty() {
            return Err(ConnectionError::InvalidEnvValue {
                name,
                message: "Empty variable name".to_string(),
            });
        }

        match self.source.get(&name) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => match modifier {
                Some('-') => Ok(modifier_value),
                Some('?') => Err(ConnectionError::InvalidEnvValue {
                    message: if modifier_value.is_empty() {
                        format!("Required variable '{}' is not set", name)
                    } else {
                        modifier_value
                    },
                    name,
                }),
                _ => Err(ConnectionError::EnvNotFound(name)),
            },
        }
    }
}
