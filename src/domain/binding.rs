// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bindings between configuration keys and command-line flags.
//!
//! A [`Binding`] says "the configuration key `server.port` is fed by the flag
//! `port` of the `server` subcommand". Resolving a list of bindings against a
//! command tree produces a [`ResolvedFlagMap`] of [`FlagHandle`]s.

use crate::domain::{ConfigKey, ConfigValue};
use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

/// A dotted path to a flag in a command tree: `sub1.sub2.flag`.
///
/// Every segment but the last names a subcommand, the last one names the flag.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CommandLineKey(String);

impl CommandLineKey {
    /// Creates a command-line key from a dotted path.
    pub fn new(key: impl Into<String>) -> Self {
        CommandLineKey(key.into())
    }

    /// Returns the dotted path.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CommandLineKey {
    fn from(s: &str) -> Self {
        CommandLineKey(s.to_string())
    }
}

impl From<String> for CommandLineKey {
    fn from(s: String) -> Self {
        CommandLineKey(s)
    }
}

impl fmt::Display for CommandLineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Associates a configuration key with the flag that provides its value.
///
/// # Examples
///
/// ```
/// use hexbind::domain::Binding;
///
/// let binding = Binding::new("server.port", "serve.port");
/// assert_eq!(binding.configuration_key.as_str(), "server.port");
/// assert_eq!(binding.command_line_key.as_str(), "serve.port");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    /// Key under which the value is queried.
    pub configuration_key: ConfigKey,
    /// Location of the flag in the command tree.
    pub command_line_key: CommandLineKey,
}

impl Binding {
    /// Creates a binding from a configuration key and a command-line key.
    pub fn new(
        configuration_key: impl Into<ConfigKey>,
        command_line_key: impl Into<CommandLineKey>,
    ) -> Self {
        Self {
            configuration_key: configuration_key.into(),
            command_line_key: command_line_key.into(),
        }
    }
}

/// Opaque handle to one flag of a command tree.
///
/// A command tree provider creates the handle with the flag identifier and its
/// declared default; the resolver records the subcommand path that leads to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlagHandle {
    name: String,
    command_path: Vec<String>,
    default_value: Option<String>,
}

impl FlagHandle {
    /// Creates a handle for the flag with the given identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command_path: Vec::new(),
            default_value: None,
        }
    }

    /// Sets the flag's declared default value.
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Sets the subcommand path under which the flag was found.
    pub fn within(mut self, command_path: Vec<String>) -> Self {
        self.command_path = command_path;
        self
    }

    /// Returns the flag identifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the subcommands leading from the root to the flag's command.
    pub fn command_path(&self) -> &[String] {
        &self.command_path
    }

    /// Returns the declared default value, if any.
    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }
}

impl fmt::Display for FlagHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.command_path {
            write!(f, "{}.", segment)?;
        }
        f.write_str(&self.name)
    }
}

/// The current value of a flag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlagValue {
    /// The value, multiple values joined with `,`.
    pub value: ConfigValue,
    /// Whether the value was given explicitly rather than taken from a default.
    pub changed: bool,
}

impl FlagValue {
    /// Creates a flag value.
    pub fn new(value: impl Into<ConfigValue>, changed: bool) -> Self {
        Self {
            value: value.into(),
            changed,
        }
    }
}

/// Flag handles keyed by configuration key.
///
/// Inserting a key twice keeps the last handle. Iteration is ordered by key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedFlagMap(BTreeMap<ConfigKey, FlagHandle>);

impl ResolvedFlagMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a handle, returning the one it replaced.
    pub fn insert(&mut self, key: ConfigKey, flag: FlagHandle) -> Option<FlagHandle> {
        self.0.insert(key, flag)
    }

    /// Returns the handle bound to `key`.
    pub fn get(&self, key: &ConfigKey) -> Option<&FlagHandle> {
        self.0.get(key)
    }

    /// Iterates over `(key, handle)` pairs in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, ConfigKey, FlagHandle> {
        self.0.iter()
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no bindings.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(ConfigKey, FlagHandle)> for ResolvedFlagMap {
    fn from_iter<I: IntoIterator<Item = (ConfigKey, FlagHandle)>>(iter: I) -> Self {
        ResolvedFlagMap(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ResolvedFlagMap {
    type Item = (&'a ConfigKey, &'a FlagHandle);
    type IntoIter = btree_map::Iter<'a, ConfigKey, FlagHandle>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
