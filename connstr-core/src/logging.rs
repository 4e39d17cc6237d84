//! Logging setup, controlled by environment variables.
//!
//! - `CONNSTR_DEBUG=true|1|yes` - enable debug logging
//! - `CONNSTR_LOG_LEVEL=trace|debug|info|warn|error` - set a specific level
//! - `CONNSTR_LOG_FORMAT=json|pretty|compact` - output format (default: json)
//!
//! The library only emits `tracing` events. A subscriber is installed by
//! [`init`] when the `tracing-subscriber` feature is enabled; otherwise the
//! application is expected to bring its own.
//!
//! ```rust,no_run
//! use connstr_core::logging;
//!
//! logging::init();
//! ```

use std::env;
use std::sync::Once;

static INIT: Once = Once::new();

/// Check if `CONNSTR_DEBUG` is set to "true", "1" or "yes" (case-insensitive).
#[inline]
pub fn is_debug_enabled() -> bool {
    env::var("CONNSTR_DEBUG")
        .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(false)
}

fn level_from(value: Option<&str>, debug: bool) -> &'static str {
    let fallback = if debug { "debug" } else { "warn" };
    match value.map(str::to_lowercase).as_deref() {
        Some("trace") => "trace",
        Some("debug") => "debug",
        Some("info") => "info",
        Some("warn") => "warn",
        Some("error") => "error",
        _ => fallback,
    }
}

fn format_from(value: Option<&str>) -> &'static str {
    match value.map(str::to_lowercase).as_deref() {
        Some("pretty") => "pretty",
        Some("compact") => "compact",
        _ => "json",
    }
}

/// The log level from `CONNSTR_LOG_LEVEL`.
///
/// Defaults to "debug" if `CONNSTR_DEBUG` is enabled, otherwise "warn".
pub fn get_log_level() -> &'static str {
    let level = env::var("CONNSTR_LOG_LEVEL").ok();
    level_from(level.as_deref(), is_debug_enabled())
}

/// The log format from `CONNSTR_LOG_FORMAT`.
pub fn get_log_format() -> &'static str {
    let format = env::var("CONNSTR_LOG_FORMAT").ok();
    format_from(format.as_deref())
}

/// Install the global subscriber. Subsequent calls are no-ops.
///
/// Nothing is installed unless `CONNSTR_DEBUG` or `CONNSTR_LOG_LEVEL` is set.
pub fn init() {
    INIT.call_once(|| {
        if !is_debug_enabled() && env::var("CONNSTR_LOG_LEVEL").is_err() {
            return;
        }

        #[cfg(feature = "tracing-subscriber")]
        {
            use tracing_subscriber::{EnvFilter, fmt, prelude::*};

            let level = get_log_level();
            let filter = EnvFilter::try_new(format!(
                "connstr={},connstr_core={},connstr_cli={}",
                level, level, level
            ))
            .unwrap_or_else(|_| EnvFilter::new("warn"));

            // logs go to stderr so command output stays clean
            match get_log_format() {
                "json" => {
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(fmt::layer().json().with_writer(std::io::stderr))
                        .init();
                }
                "compact" => {
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(fmt::layer().compact().with_writer(std::io::stderr))
                        .init();
                }
                _ => {
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(fmt::layer().pretty().with_writer(std::io::stderr))
                        .init();
                }
            }

            tracing::info!(
                level = level,
                format = get_log_format(),
                "connstr logging initialized"
            );
        }
    });
}
