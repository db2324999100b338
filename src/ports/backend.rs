// SPDX-License-Identifier: MIT OR Apache-2.0

//! Settings backend port.
//!
//! The backend is the key/value store that ends up holding the resolved
//! configuration. Source initializers configure it through this trait and the
//! aggregator finally asks it to read the active configuration file.

use crate::domain::{ConfigKey, FlagHandle, KeyReplacer, Result};
use std::path::Path;

/// A configurable, layered key/value settings store.
///
/// Precedence between the layers (flags over environment over files) is the
/// backend's contract; callers only configure the layers.
pub trait SettingsBackend {
    /// Adds a directory to search for the configuration file. Directories
    /// added later take precedence over earlier ones.
    fn add_config_path(&mut self, path: &str);

    /// Sets the configuration file type, e.g. `yaml`.
    fn set_config_type(&mut self, extension: &str);

    /// Sets the configuration file base name, without extension.
    fn set_config_name(&mut self, name: &str);

    /// Forces a specific configuration file, bypassing path/name/type discovery.
    fn set_config_file(&mut self, path: &Path);

    /// Binds a configuration key to a flag.
    ///
    /// Returns an error if the backend rejects the handle.
    fn bind_key_to_flag(&mut self, key: &ConfigKey, flag: &FlagHandle) -> Result<()>;

    /// Sets the prefix prepended to environment variable names.
    fn set_env_prefix(&mut self, prefix: &str);

    /// Sets the rule mapping configuration keys to environment variable names.
    fn set_env_key_replacer(&mut self, replacer: KeyReplacer);

    /// Lets any configuration key be satisfied from the environment.
    fn enable_automatic_env(&mut self);

    /// Reads the active configuration file.
    ///
    /// Must return [`ConfigError::ConfigFileNotFound`](crate::domain::ConfigError::ConfigFileNotFound)
    /// when no file exists, so callers can tell it apart from read failures.
    fn read_config(&mut self) -> Result<()>;
}
