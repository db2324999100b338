// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration key newtype.
//!
//! A [`ConfigKey`] is the canonical dotted name under which a resolved value is
//! queried, e.g. `server.listen.port`. Flags, environment variables and file
//! entries all meet in this namespace.

use std::fmt;

/// A type-safe wrapper for configuration keys.
///
/// Keys are dotted paths. Lookups in the settings store are case-insensitive,
/// see [`ConfigKey::normalized`].
///
/// # Examples
///
/// ```
/// use hexbind::domain::config_key::ConfigKey;
///
/// let key = ConfigKey::from("Server.Port");
/// assert_eq!(key.as_str(), "Server.Port");
/// assert_eq!(key.normalized(), "server.port");
/// assert_eq!(key.segments().collect::<Vec<_>>(), vec!["Server", "Port"]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConfigKey(String);

impl ConfigKey {
    /// Creates a new `ConfigKey` from a `String`.
    pub fn new(key: String) -> Self {
        ConfigKey(key)
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts the `ConfigKey` into its inner `String`.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Returns the lowercased form used for storage and lookup.
    pub fn normalized(&self) -> String {
        self.0.to_lowercase()
    }

    /// Iterates over the dot-separated segments of the key.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// Returns `true` if the key is the empty string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for ConfigKey {
    fn from(s: String) -> Self {
        ConfigKey(s)
    }
}

impl From<&str> for ConfigKey {
    fn from(s: &str) -> Self {
        ConfigKey(s.to_string())
    }
}

impl From<ConfigKey> for String {
    fn from(key: ConfigKey) -> Self {
        key.0
    }
}

impl AsRef<str> for ConfigKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
