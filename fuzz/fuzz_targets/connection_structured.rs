//! Structured fuzzing for connection strings.
//!
//! Builds connection strings from generated parts so most inputs get past
//! character validation and exercise defaults and rendering.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_connection_structured
//! ```

#![no_main]

use arbitrary::Arbitrary;
use connstr_core::{ConnectionDefaults, ConnectionString, EncodingOptions, Host, Render};
use libfuzzer_sys::fuzz_target;

/// A generated host entry.
#[derive(Debug, Arbitrary)]
enum FuzzHost {
    Domain(u8),
    Ipv4(u8, u8, u8, u8),
    Ipv6(u16),
    Socket(u8),
    Empty,
}

impl FuzzHost {
    fn to_text(&self, port: Option<u16>) -> String {
        let name = match self {
            Self::Domain(n) => format!("db{}.example", n),
            Self::Ipv4(a, b, c, d) => format!("{}.{}.{}.{}", a, b, c, d),
            Self::Ipv6(n) => format!("[::{:x}]", n),
            Self::Socket(n) => format!("%2Fvar%2Frun%2F{}.sock", n),
            Self::Empty => String::new(),
        };
        match port {
            Some(port) => format!("{}:{}", name, port),
            None => name,
        }
    }
}

#[derive(Debug, Arbitrary)]
struct FuzzConnection {
    protocol: Option<String>,
    user: Option<String>,
    password: Option<String>,
    hosts: Vec<(FuzzHost, Option<u16>)>,
    path: Vec<String>,
    params: Vec<(String, String)>,
    default_port: Option<u16>,
    plus_for_space: bool,
    encode_dollar: bool,
}

fn encode(text: &str) -> String {
    connstr_core::encode(text, &EncodingOptions::default()).into_owned()
}

impl FuzzConnection {
    fn to_text(&self) -> String {
        let mut out = String::new();
        if let Some(ref protocol) = self.protocol {
            out.push_str(&encode(protocol));
            out.push_str("://");
        }
        if self.user.is_some() || self.password.is_some() {
            out.push_str(&encode(self.user.as_deref().unwrap_or("")));
            if let Some(ref password) = self.password {
                out.push(':');
                out.push_str(&encode(password));
            }
            out.push('@');
        }
        let hosts: Vec<_> = self.hosts.iter().map(|(h, p)| h.to_text(*p)).collect();
        out.push_str(&hosts.join(","));
        for segment in &self.path {
            out.push('/');
            out.push_str(&encode(segment));
        }
        let params: Vec<_> = self
            .params
            .iter()
            .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
            .collect();
        if !params.is_empty() {
            out.push('?');
            out.push_str(&params.join("&"));
        }
        out
    }
}

fuzz_target!(|input: FuzzConnection| {
    let text = input.to_text();
    let Ok(conn) = ConnectionString::parse(&text) else {
        return;
    };

    let mut defaults = ConnectionDefaults::new().host(Host::new("fallback"));
    if let Some(port) = input.default_port {
        defaults = defaults.port(port);
    }
    let conn = conn.with_defaults(&defaults);
    assert!(!conn.hosts().is_empty());

    let options = EncodingOptions::new()
        .encode_dollar(input.encode_dollar)
        .plus_for_space(input.plus_for_space);
    let _ = conn.render(&options);
});
