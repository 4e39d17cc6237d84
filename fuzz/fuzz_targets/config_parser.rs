//! Fuzz target for the `connstr.toml` parser.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_config_parser
//! ```

#![no_main]

use connstr_core::{ConnstrConfig, EnvExpander, MapEnvSource};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let expander = EnvExpander::with_source(MapEnvSource::new().set("HOST", "localhost"));
        if let Ok(config) = ConnstrConfig::from_toml_with(input, &expander) {
            let _ = config.connection(None);
        }
    }
});
