//! `connstr format` command - Print the canonical form of a connection string.

use connstr_core::Render;
use tracing::debug;

use crate::cli::FormatArgs;
use crate::config;
use crate::error::CliResult;

/// Run the format command
pub fn run(args: FormatArgs) -> CliResult<()> {
    let config = config::load(&args.source)?;
    let conn = config::resolve(&args.source, &config)?;

    let mut options = config.encoding.clone();
    if args.encode_dollar {
        options = options.encode_dollar(true);
    }
    if args.plus_for_space {
        options = options.plus_for_space(true);
    }
    if args.mask {
        options = options.mask_password();
    }
    if let Some(text) = args.mask_with {
        options = options.replace_password(text);
    }
    debug!(options = ?options, "Rendering connection string");

    println!("{}", conn.render(&options));
    Ok(())
}
