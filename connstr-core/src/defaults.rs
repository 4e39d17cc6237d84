//! Connection defaults and override merging.
//!
//! [`ConnectionDefaults`] describes every part of a connection string as an
//! optional value. A parsed string can be completed from it (see
//! [`ConnectionString::set_defaults`](crate::ConnectionString::set_defaults)),
//! and two defaults records can be layered with [`ConnectionDefaults::merge`].
//!
//! ```rust
//! use connstr_core::{ConnectionDefaults, Host};
//!
//! let base = ConnectionDefaults::new()
//!     .protocol("postgres")
//!     .host(Host::new("primary"))
//!     .host(Host::new("replica"))
//!     .port(5432);
//!
//! // `None` keeps the base host at that position
//! let overrides = ConnectionDefaults::new()
//!     .placeholder()
//!     .host(Host::new("replica-2").with_port(6432));
//!
//! let merged = base.merge(overrides);
//! let hosts = merged.effective_hosts();
//! assert_eq!(hosts[0].to_string(), "primary:5432");
//! assert_eq!(hosts[1].to_string(), "replica-2:6432");
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::host::Host;

/// Fallback values for every part of a connection string.
///
/// `None` always means "no default"; an empty vector or map is an explicit
/// empty value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConnectionDefaults {
    /// Scheme, e.g. `postgres`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,

    /// Hosts in order. A `None` slot holds a position without a value.
    #[serde(with = "host_slots", skip_serializing_if = "Option::is_none")]
    pub hosts: Option<Vec<Option<Host>>>,

    /// Port applied to every host that has none of its own.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// User name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    /// Password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Path segments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<String>>,

    /// Named parameters with arbitrary values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<IndexMap<String, Value>>,
}

impl ConnectionDefaults {
    /// Create an empty defaults record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the protocol.
    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    /// Append a host.
    pub fn host(mut self, host: Host) -> Self {
        self.hosts.get_or_insert_with(Vec::new).push(Some(host));
        self
    }

    /// Append an empty host position.
    pub fn placeholder(mut self) -> Self {
        self.hosts.get_or_insert_with(Vec::new).push(None);
        self
    }

    /// Set the default port.
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the user.
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Set the password.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Append a path segment.
    pub fn segment(mut self, segment: impl Into<String>) -> Self {
        self.path.get_or_insert_with(Vec::new).push(segment.into());
        self
    }

    /// Set a parameter.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params
            .get_or_insert_with(IndexMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Layer `overrides` on top of `self`.
    ///
    /// - scalar fields: the override wins when present.
    /// - `hosts`: merged by position; a `None` (or missing) override slot
    ///   keeps the base host at that position.
    /// - `path`: replaced as a whole.
    /// - `params`: merged per name, override wins.
    pub fn merge(self, overrides: ConnectionDefaults) -> ConnectionDefaults {
        ConnectionDefaults {
            protocol: overrides.protocol.or(self.protocol),
            hosts: merge_hosts(self.hosts, overrides.hosts),
            port: overrides.port.or(self.port),
            user: overrides.user.or(self.user),
            password: overrides.password.or(self.password),
            path: overrides.path.or(self.path),
            params: match (self.params, overrides.params) {
                (Some(mut base), Some(over)) => {
                    base.extend(over);
                    Some(base)
                }
                (base, over) => over.or(base),
            },
        }
    }

    /// The port a host ends up with: its own, else the default port.
    pub fn effective_port(&self, host: &Host) -> Option<u16> {
        host.effective_port(self.port)
    }

    /// Concrete hosts with the default port applied; empty slots are dropped.
    pub fn effective_hosts(&self) -> Vec<Host> {
        self.hosts
            .iter()
            .flatten()
            .flatten()
            .map(|host| Host {
                port: self.effective_port(host),
                ..host.clone()
            })
            .collect()
    }
}

fn merge_hosts(
    base: Option<Vec<Option<Host>>>,
    overrides: Option<Vec<Option<Host>>>,
) -> Option<Vec<Option<Host>>> {
    match (base, overrides) {
        (Some(base), Some(overrides)) => {
            let len = base.len().max(overrides.len());
            let mut base = base.into_iter();
            let mut overrides = overrides.into_iter();
            Some(
                (0..len)
                    .map(|_| {
                        let fallback = base.next().flatten();
                        overrides.next().flatten().or(fallback)
                    })
                    .collect(),
            )
        }
        (base, overrides) => overrides.or(base),
    }
}

/// Host slots in config files: TOML has no null, so `{}` marks an empty slot.
mod host_slots {
    use super::Host;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<Vec<Option<Host>>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let placeholder = Host::default();
        match value {
            None => serializer.serialize_none(),
            Some(slots) => serializer.collect_seq(
                slots
                    .iter()
                    .map(|slot| slot.as_ref().unwrap_or(&placeholder)),
            ),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<Option<Host>>>, D::Error> {
        let raw: Option<Vec<Option<Host>>> = Option::deserialize(deserializer)?;
        Ok(raw.map(|slots| {
            slots
                .into_iter()
                .map(|slot| slot.filter(|host| *host != Host::default()))
                .collect()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HostType;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_builder() {
        let defaults = ConnectionDefaults::new()
            .protocol("mysql")
            .host(Host::new("db"))
            .placeholder()
            .port(3306)
            .user("root")
            .password("secret")
            .segment("app")
            .param("ssl", true);

        assert_eq!(defaults.protocol.as_deref(), Some("mysql"));
        assert_eq!(defaults.hosts.as_ref().map(Vec::len), Some(2));
        assert_eq!(defaults.path, Some(vec!["app".to_string()]));
        assert_eq!(
            defaults.params.as_ref().and_then(|p| p.get("ssl")),
            Some(&Value::Bool(true))
        );
        assert!(!defaults.is_empty());
        assert!(ConnectionDefaults::new().is_empty());
    }

    #[test]
    fn test_effective_hosts_apply_port() {
        let defaults = ConnectionDefaults::new()
            .host(Host::new("a"))
            .placeholder()
            .host(Host::new("b").with_port(1))
            .port(5432);

        let hosts = defaults.effective_hosts();
        assert_eq!(hosts.len(), 2);
        assert_eq!(hosts[0].port, Some(5432));
        assert_eq!(hosts[1].port, Some(1));
    }

    #[test]
    fn test_merge_scalars_override_wins() {
        let base = ConnectionDefaults::new()
            .protocol("postgres")
            .user("base")
            .port(5432);
        let overrides = ConnectionDefaults::new().user("override");

        let merged = base.merge(overrides);
        assert_eq!(merged.protocol.as_deref(), Some("postgres"));
        assert_eq!(merged.user.as_deref(), Some("override"));
        assert_eq!(merged.port, Some(5432));
    }

    #[test]
    fn test_merge_hosts_by_position() {
        let base = ConnectionDefaults::new()
            .host(Host::new("a"))
            .host(Host::new("b"));
        let overrides = ConnectionDefaults::new()
            .placeholder()
            .host(Host::new("c"))
            .host(Host::new("d"));

        let merged = base.merge(overrides);
        let names: Vec<_> = merged
            .effective_hosts()
            .into_iter()
            .filter_map(|h| h.name)
            .collect();
        assert_eq!(names, ["a", "c", "d"]);
    }

    #[test]
    fn test_merge_path_replaced_params_merged() {
        let base = ConnectionDefaults::new()
            .segment("one")
            .segment("two")
            .param("a", "1")
            .param("b", "2");
        let overrides = ConnectionDefaults::new()
            .segment("three")
            .param("b", "20")
            .param("c", "30");

        let merged = base.merge(overrides);
        assert_eq!(merged.path, Some(vec!["three".to_string()]));

        let params = merged.params.unwrap();
        let pairs: Vec<_> = params
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str().unwrap()))
            .collect();
        assert_eq!(pairs, [("a", "1"), ("b", "20"), ("c", "30")]);
    }

    #[test]
    fn test_toml_placeholder_slots() {
        let defaults: ConnectionDefaults = toml::from_str(
            r#"
            hosts = [{ name = "a", type = "domain" }, {}, { port = 7 }]
            port = 5432
            "#,
        )
        .unwrap();

        let hosts = defaults.hosts.clone().unwrap();
        assert_eq!(hosts.len(), 3);
        assert_eq!(hosts[0].as_ref().map(|h| h.kind), Some(Some(HostType::Domain)));
        assert!(hosts[1].is_none());
        assert_eq!(hosts[2].as_ref().and_then(|h| h.port), Some(7));

        let text = toml::to_string(&defaults).unwrap();
        let back: ConnectionDefaults = toml::from_str(&text).unwrap();
        assert_eq!(back, defaults);
    }

    #[test]
    fn test_toml_type_only_slot_kept() {
        let defaults: ConnectionDefaults =
            toml::from_str(r#"hosts = [{ type = "socket" }, {}]"#).unwrap();

        let hosts = defaults.hosts.unwrap();
        assert_eq!(hosts.len(), 2);
        assert_eq!(
            hosts[0],
            Some(Host {
                name: None,
                port: None,
                kind: Some(HostType::Socket),
            })
        );
        assert!(hosts[1].is_none());
    }

    #[test]
    fn test_json_null_slots() {
        let defaults: ConnectionDefaults =
            serde_json::from_str(r#"{"hosts": [null, {"name": "x"}]}"#).unwrap();
        let hosts = defaults.hosts.unwrap();
        assert!(hosts[0].is_none());
        assert_eq!(hosts[1].as_ref().and_then(|h| h.name.as_deref()), Some("x"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<ConnectionDefaults, _> = toml::from_str("hostname = \"x\"");
        assert!(result.is_err());
    }

    proptest! {
        #[test]
        fn prop_default_port_fills_missing(name in "[a-z]{1,12}", default in any::<u16>()) {
            let defaults = ConnectionDefaults::new().host(Host::new(name)).port(default);
            let hosts = defaults.effective_hosts();
            prop_assert_eq!(hosts[0].port, Some(default));
        }

        #[test]
        fn prop_own_port_wins(name in "[a-z]{1,12}", own in any::<u16>(), default in any::<u16>()) {
            let host = Host::new(name).with_port(own);
            let defaults = ConnectionDefaults::new().host(host.clone()).port(default);
            prop_assert_eq!(defaults.effective_port(&host), Some(own));
            prop_assert_eq!(defaults.effective_hosts()[0].port, Some(own));
        }
    }
}
