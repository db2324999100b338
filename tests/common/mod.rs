// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared helpers for integration tests.

#![allow(dead_code)]

use hexbind::domain::{ConfigKey, FlagHandle, FlagValue, KeyReplacer, Result};
use hexbind::ports::{CommandNode, FlagValues, SettingsBackend};
use std::collections::HashMap;
use std::env;
use std::path::Path;

/// In-memory command tree.
#[derive(Debug, Clone)]
pub struct FakeCommand {
    pub name: String,
    pub flags: Vec<(String, Option<String>)>,
    pub children: Vec<FakeCommand>,
}

impl FakeCommand {
    pub fn new(name: &str) -> Self {
        FakeCommand {
            name: name.to_string(),
            flags: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn flag(mut self, name: &str) -> Self {
        self.flags.push((name.to_string(), None));
        self
    }

    pub fn flag_with_default(mut self, name: &str, default: &str) -> Self {
        self.flags.push((name.to_string(), Some(default.to_string())));
        self
    }

    pub fn child(mut self, child: FakeCommand) -> Self {
        self.children.push(child);
        self
    }
}

impl CommandNode for FakeCommand {
    fn name(&self) -> &str {
        &self.name
    }

    fn children(&self) -> Vec<&Self> {
        self.children.iter().collect()
    }

    fn lookup_flag(&self, name: &str) -> Option<FlagHandle> {
        self.flags
            .iter()
            .find(|(flag, _)| flag == name)
            .map(|(flag, default)| match default {
                Some(default) => FlagHandle::new(flag.as_str()).with_default(default.as_str()),
                None => FlagHandle::new(flag.as_str()),
            })
    }
}

/// `acme` with `server` (`port`, `admin` (`token`)) and `client` (`url`).
pub fn acme_tree() -> FakeCommand {
    FakeCommand::new("acme")
        .flag("verbose")
        .child(
            FakeCommand::new("server")
                .flag_with_default("port", "8080")
                .flag("host")
                .child(FakeCommand::new("admin").flag("token")),
        )
        .child(FakeCommand::new("client").flag("url"))
}

/// Flag values keyed by the flag's display path (`server.port`).
#[derive(Debug, Default)]
pub struct MapFlagValues {
    values: HashMap<String, FlagValue>,
}

impl MapFlagValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// A value given on the command line.
    pub fn changed(mut self, path: &str, value: &str) -> Self {
        self.values
            .insert(path.to_string(), FlagValue::new(value, true));
        self
    }

    /// A value the parser filled in without the user giving it.
    pub fn unchanged(mut self, path: &str, value: &str) -> Self {
        self.values
            .insert(path.to_string(), FlagValue::new(value, false));
        self
    }
}

impl FlagValues for MapFlagValues {
    fn flag_value(&self, flag: &FlagHandle) -> Option<FlagValue> {
        self.values.get(&flag.to_string()).cloned()
    }
}

/// Backend that records every call made on it.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub calls: Vec<String>,
    pub reject_flags: bool,
}

impl SettingsBackend for RecordingBackend {
    fn add_config_path(&mut self, path: &str) {
        self.calls.push(format!("add_config_path {}", path));
    }

    fn set_config_type(&mut self, extension: &str) {
        self.calls.push(format!("set_config_type {}", extension));
    }

    fn set_config_name(&mut self, name: &str) {
        self.calls.push(format!("set_config_name {}", name));
    }

    fn set_config_file(&mut self, path: &Path) {
        self.calls
            .push(format!("set_config_file {}", path.display()));
    }

    fn bind_key_to_flag(&mut self, key: &ConfigKey, flag: &FlagHandle) -> Result<()> {
        if self.reject_flags {
            return Err(hexbind::domain::ConfigError::InvalidFlag {
                key: key.to_string(),
                message: "rejected".to_string(),
            });
        }
        self.calls.push(format!("bind_key_to_flag {} {}", key, flag));
        Ok(())
    }

    fn set_env_prefix(&mut self, prefix: &str) {
        self.calls.push(format!("set_env_prefix {}", prefix));
    }

    fn set_env_key_replacer(&mut self, replacer: KeyReplacer) {
        self.calls.push(format!(
            "set_env_key_replacer {}",
            replacer.replace("a.b")
        ));
    }

    fn enable_automatic_env(&mut self) {
        self.calls.push("enable_automatic_env".to_string());
    }

    fn read_config(&mut self) -> Result<()> {
        self.calls.push("read_config".to_string());
        Ok(())
    }
}

/// Helper to set and clean up environment variables
pub struct EnvGuard {
    keys: Vec<String>,
}

impl EnvGuard {
    pub fn new() -> Self {
        EnvGuard { keys: Vec::new() }
    }

    pub fn set(&mut self, key: &str, value: &str) {
        env::set_var(key, value);
        self.keys.push(key.to_string());
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for key in &self.keys {
            env::remove_var(key);
        }
    }
}
