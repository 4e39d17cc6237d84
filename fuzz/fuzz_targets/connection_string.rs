//! Fuzz target for the connection string parser.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_connection_string
//! ```

#![no_main]

use connstr_core::{ConnectionString, EncodingOptions, Render};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // The parser should never panic, only return errors
        if let Ok(conn) = ConnectionString::parse(input) {
            let plain = conn.render_default();
            let masked = conn.render(&EncodingOptions::new().mask_password().plus_for_space(true));
            assert_eq!(plain, conn.render_default());
            if conn.password().is_none() {
                assert!(!masked.contains('#'));
            }
        }
    }
});
