//! # connstr-core
//!
//! Data model, parser and renderer for connection strings of the form
//!
//! ```text
//! [protocol://][user[:password]@][host1[:port1],host2[:port2],...][/segment1/segment2...][?name1=value1&...]
//! ```
//!
//! This crate provides:
//! - [`HostType`], [`Host`] and [`ParsedHost`]: one endpoint, with kind detection
//! - [`EncodingOptions`] and the [`Render`] trait: deterministic rendering back to text
//! - [`ConnectionDefaults`]: fallback values and override merging
//! - [`ConnectionString`]: the parser, serializer and defaults application
//! - [`ConnstrConfig`]: `connstr.toml` loading with `${VAR}` expansion
//!
//! ## Parsing
//!
//! ```rust
//! use connstr_core::{ConnectionString, HostType};
//!
//! let conn = ConnectionString::parse("mongodb://app@db1:27017,db2,10.0.0.7/orders?w=majority").unwrap();
//! assert_eq!(conn.user(), Some("app"));
//! assert_eq!(conn.hosts().len(), 3);
//! assert_eq!(conn.hosts()[2].kind, Some(HostType::Ipv4));
//! assert_eq!(conn.param("w"), Some("majority"));
//! ```
//!
//! ## Defaults
//!
//! ```rust
//! use connstr_core::{ConnectionDefaults, ConnectionString};
//!
//! let defaults = ConnectionDefaults::new().protocol("postgres").port(5432);
//! let conn = ConnectionString::parse_with_defaults("primary,replica:6432/app", &defaults).unwrap();
//! assert_eq!(conn.to_string(), "postgres://primary:5432,replica:6432/app");
//! ```
//!
//! ## Rendering
//!
//! ```rust
//! use connstr_core::{ConnectionString, EncodingOptions, Render};
//!
//! let conn = ConnectionString::parse("redis://:hunter2@cache").unwrap();
//! let opts = EncodingOptions::new().replace_password("***");
//! assert_eq!(conn.render(&opts), "redis://:***@cache");
//! ```

#![deny(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod defaults;
pub mod encoding;
pub mod env;
pub mod error;
pub mod host;
pub mod logging;
pub mod parser;

pub use config::{CONFIG_FILE_NAME, ConnstrConfig, EncodingOverride, EnvironmentOverride};
pub use defaults::ConnectionDefaults;
pub use encoding::{
    EncodingOptions, MASK_CHAR, PasswordHash, Render, decode, decode_protocol, encode,
    encode_protocol, render_password,
};
pub use env::{EnvExpander, EnvSource, MapEnvSource, StdEnvSource};
pub use error::{ConnectionError, ConnectionResult};
pub use host::{Host, HostType, ParsedHost};
pub use parser::ConnectionString;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        ConnectionDefaults, ConnectionError, ConnectionResult, ConnectionString, EncodingOptions,
        Host, HostType, ParsedHost, PasswordHash, Render,
    };
}
