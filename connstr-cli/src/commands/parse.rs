//! `connstr parse` command - Show the parts of a connection string.

use connstr_core::{ConnectionDefaults, EncodingOptions, Render, render_password};

use crate::cli::ParseArgs;
use crate::config;
use crate::error::CliResult;
use crate::output::{self, kv};

/// Run the parse command
pub fn run(args: ParseArgs) -> CliResult<()> {
    let config = config::load(&args.source)?;
    let conn = config::resolve(&args.source, &config)?;

    let password_options = if args.show_password {
        EncodingOptions::default()
    } else {
        EncodingOptions::new().mask_password()
    };

    if args.json {
        let mut defaults: ConnectionDefaults = conn.to_defaults();
        if !args.show_password {
            defaults.password = defaults
                .password
                .map(|p| render_password(&p, &password_options).into_owned());
        }
        println!("{}", serde_json::to_string_pretty(&defaults)?);
        return Ok(());
    }

    output::header("Connection String");
    kv("Rendered", &conn.render(&password_options));
    kv("Protocol", conn.protocol().unwrap_or("-"));
    kv("User", conn.user().unwrap_or("-"));
    let password = conn
        .password()
        .map(|p| render_password(p, &password_options).into_owned());
    kv("Password", password.as_deref().unwrap_or("-"));
    output::newline();

    output::section("Hosts");
    if conn.hosts().is_empty() {
        output::dim("  (none)");
    }
    for host in conn.hosts() {
        let kind = host.kind.map_or("-", |k| k.as_str());
        output::list_item(&format!("{} [{}]", host.render_default(), kind));
    }
    output::newline();

    output::section("Path");
    if conn.path().is_empty() {
        output::dim("  (none)");
    } else {
        output::list_item(&format!("/{}", conn.path().join("/")));
    }
    output::newline();

    output::section("Parameters");
    if conn.params().is_empty() {
        output::dim("  (none)");
    }
    for (name, value) in conn.params() {
        let value = match value.as_str() {
            Some(text) => text.to_string(),
            None => value.to_string(),
        };
        kv(name, &value);
    }

    let missing_ports = conn.hosts().iter().filter(|h| h.port.is_none()).count();
    if missing_ports > 0 {
        output::newline();
        output::warn(&format!(
            "{} host(s) without a port; set `port` in [defaults] to fill them",
            missing_ports
        ));
    }

    Ok(())
}
