//! Host descriptors: one endpoint of a connection target list.

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::encoding::{EncodingOptions, Render, decode, encode};
use crate::error::{ConnectionError, ConnectionResult};

/// How the `name` of a [`Host`] is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HostType {
    /// Regular domain name.
    #[serde(rename = "domain")]
    Domain,
    /// UNIX socket path.
    #[serde(rename = "socket")]
    Socket,
    /// IPv4 literal.
    #[serde(rename = "IPv4")]
    Ipv4,
    /// IPv6 literal, kept in brackets.
    #[serde(rename = "IPv6")]
    Ipv6,
}

impl HostType {
    /// The string value of the variant.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Socket => "socket",
            Self::Ipv4 => "IPv4",
            Self::Ipv6 => "IPv6",
        }
    }
}

impl fmt::Display for HostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HostType {
    type Err = ConnectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "domain" => Ok(Self::Domain),
            "socket" => Ok(Self::Socket),
            "IPv4" => Ok(Self::Ipv4),
            "IPv6" => Ok(Self::Ipv6),
            other => Err(ConnectionError::invalid_host(format!(
                "unknown host type {:?}",
                other
            ))),
        }
    }
}

/// A single network endpoint. Every field is optional; gaps are filled by
/// [`ConnectionDefaults`](crate::ConnectionDefaults).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Host {
    /// Host name, IP literal or socket path (decoded).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Port number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// Interpretation of `name`.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<HostType>,
}

/// A host produced by the parser. Renders through [`Render`] and `Display`.
pub type ParsedHost = Host;

impl Host {
    /// Create a host from a name, classifying it.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let kind = Self::classify(&name);
        Self {
            name: Some(name),
            port: None,
            kind: Some(kind),
        }
    }

    /// Set the port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the host type explicitly.
    pub fn with_kind(mut self, kind: HostType) -> Self {
        self.kind = Some(kind);
        self
    }

    /// True when neither a name nor a port is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.port.is_none()
    }

    /// The host's own port, falling back to `default`.
    pub fn effective_port(&self, default: Option<u16>) -> Option<u16> {
        self.port.or(default)
    }

    /// The explicit kind, or the kind classified from the name.
    pub fn resolved_kind(&self) -> Option<HostType> {
        self.kind
            .or_else(|| self.name.as_deref().map(Self::classify))
    }

    /// Classify a decoded host name.
    pub fn classify(name: &str) -> HostType {
        if name.parse::<Ipv4Addr>().is_ok() {
            HostType::Ipv4
        } else if is_bracketed_ipv6(name) {
            HostType::Ipv6
        } else if name.contains('/')
            || name.contains('\\')
            || name.to_ascii_lowercase().ends_with(".sock")
        {
            HostType::Socket
        } else {
            HostType::Domain
        }
    }

    /// Parse one `name[:port]` or `[ipv6][:port]` entry.
    ///
    /// Returns `Ok(None)` for blank input.
    ///
    /// ```rust
    /// use connstr_core::{Host, HostType};
    ///
    /// let host = Host::parse("[::1]:5432").unwrap().unwrap();
    /// assert_eq!(host.name.as_deref(), Some("[::1]"));
    /// assert_eq!(host.port, Some(5432));
    /// assert_eq!(host.kind, Some(HostType::Ipv6));
    ///
    /// let sock = Host::parse("%2Ftmp%2F.s.PGSQL.5432").unwrap().unwrap();
    /// assert_eq!(sock.kind, Some(HostType::Socket));
    /// ```
    pub fn parse(text: &str) -> ConnectionResult<Option<ParsedHost>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        if let Some(rest) = text.strip_prefix('[') {
            return parse_ipv6(text, rest).map(Some);
        }

        let (name_part, port) = match text.rsplit_once(':') {
            Some((name, port)) => {
                if name.contains(':') {
                    return Err(ConnectionError::invalid_host(format!(
                        "IPv6 address {:?} must be enclosed in brackets",
                        text
                    )));
                }
                (name, Some(parse_port(port)?))
            }
            None => (text, None),
        };

        let name = decode(name_part)?;
        if name.is_empty() {
            return Ok(Some(Host {
                name: None,
                port,
                kind: None,
            }));
        }

        let kind = Self::classify(&name);
        trace!(name = %name, kind = %kind, port = ?port, "Host classified");
        Ok(Some(Host {
            name: Some(name),
            port,
            kind: Some(kind),
        }))
    }
}

/// `[literal]` where `literal` is a valid IPv6 address.
fn is_bracketed_ipv6(name: &str) -> bool {
    name.strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .is_some_and(|literal| literal.parse::<Ipv6Addr>().is_ok())
}

fn parse_ipv6(text: &str, rest: &str) -> ConnectionResult<Host> {
    let close = rest.find(']').ok_or_else(|| {
        ConnectionError::invalid_host(format!("missing \"]\" in IPv6 address {:?}", text))
    })?;

    let literal = &rest[..close];
    if literal.parse::<Ipv6Addr>().is_err() {
        return Err(ConnectionError::invalid_host(format!(
            "invalid IPv6 address {:?}",
            text
        )));
    }

    let after = &rest[close + 1..];
    let port = if after.is_empty() {
        None
    } else if let Some(port) = after.strip_prefix(':') {
        Some(parse_port(port)?)
    } else {
        return Err(ConnectionError::invalid_host(format!(
            "unexpected {:?} after IPv6 address",
            after
        )));
    };

    Ok(Host {
        name: Some(format!("[{}]", literal)),
        port,
        kind: Some(HostType::Ipv6),
    })
}

fn parse_port(text: &str) -> ConnectionResult<u16> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ConnectionError::InvalidPort(text.to_string()));
    }
    text.parse()
        .map_err(|_| ConnectionError::InvalidPort(text.to_string()))
}

impl Render for Host {
    fn render(&self, options: &EncodingOptions) -> String {
        let mut out = String::new();
        if let Some(ref name) = self.name {
            if is_bracketed_ipv6(name) {
                out.push_str(name);
            } else {
                out.push_str(&encode(name, options));
            }
        }
        if let Some(port) = self.port {
            out.push(':');
            out.push_str(&port.to_string());
        }
        out
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_default())
    }
}
