//! CLI configuration handling.

use std::path::Path;

use connstr_core::{CONFIG_FILE_NAME, ConnectionString, ConnstrConfig};
use tracing::debug;

use crate::cli::SourceArgs;
use crate::error::{CliError, CliResult};

/// Load the config named by `--config`, else `./connstr.toml` when it exists,
/// else an empty one. `--env` overrides are applied on top.
pub fn load(source: &SourceArgs) -> CliResult<ConnstrConfig> {
    let config = match source.config {
        Some(ref path) => ConnstrConfig::from_file(path)?,
        None => {
            let path = Path::new(CONFIG_FILE_NAME);
            if path.exists() {
                ConnstrConfig::from_file(path)?
            } else {
                debug!("No config file found, using empty defaults");
                ConnstrConfig::default()
            }
        }
    };

    match source.env {
        Some(ref env) => {
            if !config.environments.contains_key(env) {
                return Err(CliError::Config(format!(
                    "Unknown environment '{}' (available: {})",
                    env,
                    config.environment_names().join(", ")
                )));
            }
            Ok(config.with_environment(env))
        }
        None => Ok(config),
    }
}

/// Resolve the connection string the command works on.
pub fn resolve(source: &SourceArgs, config: &ConnstrConfig) -> CliResult<ConnectionString> {
    if source.input.is_none() && config.url.is_none() {
        return Err(CliError::Config(format!(
            "No connection string given and no `url` in {}",
            CONFIG_FILE_NAME
        )));
    }

    if source.no_defaults {
        return Ok(match source.input {
            Some(ref input) => ConnectionString::parse(input)?,
            None => config.url.clone().unwrap_or_default(),
        });
    }

    Ok(config.connection(source.input.as_deref())?)
}
