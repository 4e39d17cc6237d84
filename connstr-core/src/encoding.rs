//! Percent-encoding and rendering options.
//!
//! Components of a connection string are encoded the way `encodeURIComponent`
//! does it: everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )` becomes `%XX`.
//! [`EncodingOptions`] then adjusts the result:
//!
//! ```rust
//! use connstr_core::{EncodingOptions, encode};
//!
//! let defaults = EncodingOptions::default();
//! assert_eq!(encode("a$b", &defaults), "a$b");
//! assert_eq!(encode("a b", &defaults), "a%20b");
//!
//! let opts = EncodingOptions::new().encode_dollar(true).plus_for_space(true);
//! assert_eq!(encode("a$b", &opts), "a%24b");
//! assert_eq!(encode("a b", &opts), "a+b");
//! ```

use std::borrow::Cow;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use serde::{Deserialize, Serialize};

use crate::error::{ConnectionError, ConnectionResult};

/// Characters left untouched when encoding a component.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Character used by [`PasswordHash::Mask`].
pub const MASK_CHAR: char = '#';

/// How a password is hidden when a connection string is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PasswordHash {
    /// Replace every character of the password with [`MASK_CHAR`].
    Mask,
    /// Replace the whole password with the given text, emitted verbatim.
    Replace(String),
}

/// Rendering toggles for hosts, credentials, path segments and parameters.
///
/// All toggles are independent. `Default` gives the plain rendering: `$` kept
/// as is, space as `%20`, password shown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncodingOptions {
    /// Percent-encode `$` as `%24`.
    pub encode_dollar: bool,

    /// Render a space as `+` instead of `%20`.
    pub plus_for_space: bool,

    /// Hide the password. `true`/`false` or a replacement string in config files.
    #[serde(with = "password_hash_serde", skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<PasswordHash>,
}

impl EncodingOptions {
    /// Options with every toggle at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether `$` is percent-encoded.
    pub fn encode_dollar(mut self, enabled: bool) -> Self {
        self.encode_dollar = enabled;
        self
    }

    /// Set whether a space renders as `+`.
    pub fn plus_for_space(mut self, enabled: bool) -> Self {
        self.plus_for_space = enabled;
        self
    }

    /// Mask the password with [`MASK_CHAR`].
    pub fn mask_password(mut self) -> Self {
        self.password_hash = Some(PasswordHash::Mask);
        self
    }

    /// Render `replacement` in place of the password.
    pub fn replace_password(mut self, replacement: impl Into<String>) -> Self {
        self.password_hash = Some(PasswordHash::Replace(replacement.into()));
        self
    }
}

/// Textual form of a value under caller-selected [`EncodingOptions`].
///
/// Implementations are pure: the same options always give the same string.
pub trait Render {
    /// Render with the given options.
    fn render(&self, options: &EncodingOptions) -> String;

    /// Render with every option at its default.
    fn render_default(&self) -> String {
        self.render(&EncodingOptions::default())
    }
}

/// Percent-encode a single component according to `options`.
pub fn encode<'a>(text: &'a str, options: &EncodingOptions) -> Cow<'a, str> {
    let mut encoded: Cow<'a, str> = utf8_percent_encode(text, COMPONENT).into();
    if options.plus_for_space && encoded.contains("%20") {
        encoded = Cow::Owned(encoded.replace("%20", "+"));
    }
    if !options.encode_dollar && encoded.contains("%24") {
        encoded = Cow::Owned(encoded.replace("%24", "$"));
    }
    encoded
}

/// Percent-encode a protocol. `+` stays literal (`mongodb+srv`), so a space
/// is always `%20` here regardless of `plus_for_space`.
pub fn encode_protocol<'a>(text: &'a str, options: &EncodingOptions) -> Cow<'a, str> {
    let plain = EncodingOptions::new().encode_dollar(options.encode_dollar);
    let encoded = encode(text, &plain);
    if encoded.contains("%2B") {
        Cow::Owned(encoded.replace("%2B", "+"))
    } else {
        encoded
    }
}

/// Decode a percent-encoded component. `+` decodes to a space.
pub fn decode(text: &str) -> ConnectionResult<String> {
    decode_with(text, true)
}

/// Decode a protocol. Unlike [`decode`], `+` is kept.
pub fn decode_protocol(text: &str) -> ConnectionResult<String> {
    decode_with(text, false)
}

fn decode_with(text: &str, plus_as_space: bool) -> ConnectionResult<String> {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let escape_ok = i + 2 < bytes.len()
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !escape_ok {
                return Err(ConnectionError::InvalidEncoding(format!(
                    "malformed escape at position {} in {:?}",
                    i, text
                )));
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    let spaced = if plus_as_space {
        Cow::Owned(text.replace('+', " "))
    } else {
        Cow::Borrowed(text)
    };
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(Cow::into_owned)
        .map_err(|_| ConnectionError::InvalidEncoding(format!("{:?} is not valid UTF-8", text)))
}

/// Render a password under `options`: masked, replaced or encoded.
pub fn render_password<'a>(password: &'a str, options: &'a EncodingOptions) -> Cow<'a, str> {
    match &options.password_hash {
        None => encode(password, options),
        Some(PasswordHash::Mask) => Cow::Owned(
            std::iter::repeat_n(MASK_CHAR, password.chars().count()).collect(),
        ),
        Some(PasswordHash::Replace(replacement)) => Cow::Borrowed(replacement.as_str()),
    }
}

pub(crate) mod password_hash_serde {
    use super::PasswordHash;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Flag(bool),
        Text(String),
    }

    pub fn serialize<S: Serializer>(
        value: &Option<PasswordHash>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            None => serializer.serialize_bool(false),
            Some(PasswordHash::Mask) => serializer.serialize_bool(true),
            Some(PasswordHash::Replace(text)) => serializer.serialize_str(text),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<PasswordHash>, D::Error> {
        Ok(match Raw::deserialize(deserializer)? {
            Raw::Flag(false) => None,
            Raw::Flag(true) => Some(PasswordHash::Mask),
            Raw::Text(text) => Some(PasswordHash::Replace(text)),
        })
    }
}
