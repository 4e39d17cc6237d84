//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// connstr - inspect and normalize connection strings
#[derive(Parser, Debug)]
#[command(name = "connstr")]
#[command(author = "Pegasus Heavy Industries LLC")]
#[command(version)]
#[command(about = "connstr - inspect and normalize connection strings", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the parts of a connection string
    Parse(ParseArgs),

    /// Print the canonical form of a connection string
    Format(FormatArgs),

    /// Display version information
    Version,
}

/// Where the connection string and its defaults come from
#[derive(Args, Debug, Default)]
pub struct SourceArgs {
    /// Connection string (defaults to `url` from the config file)
    pub input: Option<String>,

    /// Path to config file (defaults to ./connstr.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Environment overrides to apply from the config file
    #[arg(short, long)]
    pub env: Option<String>,

    /// Ignore config file defaults
    #[arg(long)]
    pub no_defaults: bool,
}

// =============================================================================
// Parse Command
// =============================================================================

/// Arguments for the `parse` command
#[derive(Args, Debug)]
pub struct ParseArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Show the password instead of a mask
    #[arg(long)]
    pub show_password: bool,
}

// =============================================================================
// Format Command
// =============================================================================

/// Arguments for the `format` command
#[derive(Args, Debug)]
pub struct FormatArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Percent-encode `$` as %24
    #[arg(long)]
    pub encode_dollar: bool,

    /// Render spaces as `+`
    #[arg(long)]
    pub plus_for_space: bool,

    /// Replace each password character with `#`
    #[arg(long, conflicts_with = "mask_with")]
    pub mask: bool,

    /// Replace the password with this text
    #[arg(long, value_name = "TEXT")]
    pub mask_with: Option<String>,
}
