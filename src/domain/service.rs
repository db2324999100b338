// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration query trait.
//!
//! Once the composition pass has run, resolved values are read through
//! [`ConfigurationService`], independent of which source supplied them.

use crate::domain::{ConfigError, ConfigKey, ConfigValue, Result};

/// Read access to resolved configuration.
///
/// # Examples
///
/// ```rust
/// use hexbind::domain::{ConfigError, ConfigKey, ConfigValue, ConfigurationService, Result};
///
/// struct Fixed;
///
/// impl ConfigurationService for Fixed {
///     fn get(&self, key: &ConfigKey) -> Result<ConfigValue> {
///         match key.as_str() {
///             "server.port" => Ok(ConfigValue::from("8080")),
///             _ => Err(ConfigError::ConfigKeyNotFound { key: key.to_string() }),
///         }
///     }
///
///     fn all_keys(&self) -> Vec<ConfigKey> {
///         vec![ConfigKey::from("server.port")]
///     }
/// }
///
/// let service = Fixed;
/// assert!(service.has(&ConfigKey::from("server.port")));
/// assert_eq!(service.get_or_default(&ConfigKey::from("log.level"), "info").as_str(), "info");
/// ```
pub trait ConfigurationService {
    /// Returns the value for `key` from the highest-precedence source that
    /// has one, or [`ConfigError::ConfigKeyNotFound`].
    fn get(&self, key: &ConfigKey) -> Result<ConfigValue>;

    /// Lists every key known to the service.
    fn all_keys(&self) -> Vec<ConfigKey>;

    /// Returns the value for `key`, or `default` if no source has one.
    fn get_or_default(&self, key: &ConfigKey, default: &str) -> ConfigValue {
        self.get(key).unwrap_or_else(|_| ConfigValue::from(default))
    }

    /// Returns `true` if some source has a value for `key`.
    fn has(&self, key: &ConfigKey) -> bool {
        self.get(key).is_ok()
    }

    /// Same as [`get`](Self::get) for a plain string key.
    fn get_str(&self, key: &str) -> Result<ConfigValue> {
        self.get(&ConfigKey::from(key))
    }
}

/// Convenience for building the not-found error of a key.
pub(crate) fn key_not_found(key: &ConfigKey) -> ConfigError {
    ConfigError::ConfigKeyNotFound {
        key: key.as_str().to_string(),
    }
}
