// SPDX-License-Identifier: MIT OR Apache-2.0

//! Default settings backend.
//!
//! [`Settings`] is a layered key/value store. Initializers configure its
//! layers through [`SettingsBackend`]; callers query it through
//! [`ConfigurationService`] once the configuration file has been read.

use crate::adapters::config_file;
use crate::domain::service::key_not_found;
use crate::domain::{
    ConfigError, ConfigKey, ConfigValue, ConfigurationService, FlagHandle, KeyReplacer, Result,
};
use crate::ports::{ConfigParser, FlagValues, SettingsBackend};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

/// Maximum length for environment variable names
const MAX_ENV_KEY_LEN: usize = 512;

/// Maximum length for environment variable values
const MAX_ENV_VALUE_LEN: usize = 1048576; // 1MB

/// Config file base name used when none is set
const DEFAULT_CONFIG_NAME: &str = "config";

/// Layered settings store.
///
/// Keys are case-insensitive. [`get`](ConfigurationService::get) returns the
/// value of the first layer that has one, in this order:
///
/// 1. explicit overrides ([`Settings::set`])
/// 2. bound flags that were set on the command line
/// 3. environment variables, once automatic lookup is enabled
/// 4. configuration files
/// 5. defaults ([`Settings::set_default`])
/// 6. the default value of a bound flag
///
/// # Examples
///
/// ```rust
/// use hexbind::adapters::Settings;
/// use hexbind::domain::{ConfigKey, ConfigurationService};
///
/// let mut settings = Settings::new();
/// settings.set_default("server.port", "8080");
/// settings.set("Server.Host", "localhost");
///
/// assert_eq!(settings.get_str("server.port").unwrap().as_str(), "8080");
/// assert_eq!(settings.get(&ConfigKey::from("server.host")).unwrap().as_str(), "localhost");
/// ```
pub struct Settings {
    config_paths: Vec<PathBuf>,
    config_name: String,
    config_type: Option<String>,
    config_file: Option<PathBuf>,
    parsers: Vec<Box<dyn ConfigParser>>,
    files_used: Vec<PathBuf>,
    file_values: HashMap<String, ConfigValue>,
    flag_bindings: BTreeMap<String, FlagHandle>,
    flag_values: Option<Box<dyn FlagValues>>,
    env_prefix: String,
    env_key_replacer: Option<KeyReplacer>,
    automatic_env: bool,
    overrides: HashMap<String, ConfigValue>,
    defaults: HashMap<String, ConfigValue>,
}

impl Settings {
    /// Creates an empty store with the parsers enabled by crate features.
    pub fn new() -> Self {
        let mut settings = Self::without_parsers();
        #[cfg(feature = "yaml")]
        settings.register_parser(Box::new(crate::adapters::YamlParser::new()));
        settings
    }

    /// Creates an empty store with no file parsers registered.
    pub fn without_parsers() -> Self {
        Self {
            config_paths: Vec::new(),
            config_name: DEFAULT_CONFIG_NAME.to_string(),
            config_type: None,
            config_file: None,
            parsers: Vec::new(),
            files_used: Vec::new(),
            file_values: HashMap::new(),
            flag_bindings: BTreeMap::new(),
            flag_values: None,
            env_prefix: String::new(),
            env_key_replacer: None,
            automatic_env: false,
            overrides: HashMap::new(),
            defaults: HashMap::new(),
        }
    }

    /// Registers a parser for configuration files. Parsers registered later
    /// are tried first for an extension both support.
    pub fn register_parser(&mut self, parser: Box<dyn ConfigParser>) {
        self.parsers.insert(0, parser);
    }

    /// Sets the provider of current flag values, usually the parsed
    /// command-line matches.
    pub fn set_flag_values(&mut self, values: impl FlagValues + 'static) {
        self.flag_values = Some(Box::new(values));
    }

    /// Sets an explicit value that overrides every other source.
    pub fn set(&mut self, key: impl Into<ConfigKey>, value: impl Into<ConfigValue>) {
        self.overrides
            .insert(key.into().normalized(), value.into());
    }

    /// Sets the value used when no other source has one.
    pub fn set_default(&mut self, key: impl Into<ConfigKey>, value: impl Into<ConfigValue>) {
        self.defaults
            .insert(key.into().normalized(), value.into());
    }

    /// Files read by the last successful [`read_config`](SettingsBackend::read_config),
    /// lowest precedence first.
    pub fn config_files_used(&self) -> &[PathBuf] {
        &self.files_used
    }

    /// Expanded search directories, lowest precedence first.
    pub fn config_paths(&self) -> &[PathBuf] {
        &self.config_paths
    }

    /// Returns the flag bound to `key`, if any.
    pub fn bound_flag(&self, key: &ConfigKey) -> Option<&FlagHandle> {
        self.flag_bindings.get(&key.normalized())
    }

    /// Returns `true` when automatic environment lookup is enabled.
    pub fn automatic_env(&self) -> bool {
        self.automatic_env
    }

    /// Environment variable name consulted for `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hexbind::adapters::Settings;
    /// use hexbind::domain::{ConfigKey, KeyReplacer};
    /// use hexbind::ports::SettingsBackend;
    ///
    /// let mut settings = Settings::new();
    /// settings.set_env_prefix("ACME_");
    /// settings.set_env_key_replacer(KeyReplacer::new([(".", "_")]));
    /// assert_eq!(settings.env_var_name(&ConfigKey::from("server.port")), "ACME_SERVER_PORT");
    /// ```
    pub fn env_var_name(&self, key: &ConfigKey) -> String {
        let key = key.normalized();
        let key = match &self.env_key_replacer {
            Some(replacer) => replacer.replace(&key),
            None => key,
        };
        format!("{}{}", self.env_prefix, key).to_uppercase()
    }

    fn env_value(&self, key: &ConfigKey) -> Option<ConfigValue> {
        let name = self.env_var_name(key);
        if name.len() > MAX_ENV_KEY_LEN {
            tracing::debug!(
                "Skipping oversized environment variable name: len={} (max {})",
                name.len(),
                MAX_ENV_KEY_LEN
            );
            return None;
        }

        match env::var(&name) {
            Ok(value) if value.len() > MAX_ENV_VALUE_LEN => {
                tracing::debug!(
                    "Skipping oversized environment variable {}: len={} (max {})",
                    name,
                    value.len(),
                    MAX_ENV_VALUE_LEN
                );
                None
            }
            Ok(value) if !value.is_empty() => Some(ConfigValue::from(value)),
            _ => None,
        }
    }

    /// Current value of the flag bound to `key`, split into whether it was
    /// set explicitly.
    fn flag_value(&self, key: &str) -> Option<(ConfigValue, bool)> {
        let flag = self.flag_bindings.get(key)?;
        let current = self
            .flag_values
            .as_ref()
            .and_then(|values| values.flag_value(flag));

        match current {
            Some(current) => Some((current.value, current.changed)),
            None => flag
                .default_value()
                .map(|default| (ConfigValue::from(default), false)),
        }
    }

    fn find(&self, key: &ConfigKey) -> Option<ConfigValue> {
        let normalized = key.normalized();

        if let Some(value) = self.overrides.get(&normalized) {
            return Some(value.clone());
        }

        let flag = self.flag_value(&normalized);
        if let Some((value, true)) = &flag {
            return Some(value.clone());
        }

        if self.automatic_env {
            if let Some(value) = self.env_value(key) {
                return Some(value);
            }
        }

        if let Some(value) = self.file_values.get(&normalized) {
            return Some(value.clone());
        }

        if let Some(value) = self.defaults.get(&normalized) {
            return Some(value.clone());
        }

        flag.map(|(value, _)| value)
    }

    fn parser_for(&self, extension: &str) -> Option<&dyn ConfigParser> {
        self.parsers
            .iter()
            .find(|parser| parser.supports(extension))
            .map(|parser| parser.as_ref())
    }

    /// Extensions tried during discovery: the configured type, or every
    /// extension a registered parser supports.
    fn search_extensions(&self) -> Vec<&str> {
        match &self.config_type {
            Some(ext) => vec![ext.as_str()],
            None => self
                .parsers
                .iter()
                .flat_map(|parser| parser.supported_extensions().iter().copied())
                .collect(),
        }
    }

    fn locate_files(&self) -> Result<Vec<PathBuf>> {
        if let Some(path) = &self.config_file {
            return Ok(vec![path.clone()]);
        }

        let found = config_file::discover(
            &self.config_paths,
            &self.config_name,
            &self.search_extensions(),
        );
        if found.is_empty() {
            return Err(ConfigError::ConfigFileNotFound {
                name: self.config_name.clone(),
                locations: self
                    .config_paths
                    .iter()
                    .map(|path| path.display().to_string())
                    .collect(),
            });
        }
        Ok(found)
    }

    fn read_file(&self, path: &Path) -> Result<HashMap<String, String>> {
        let extension = self
            .config_type
            .as_deref()
            .or_else(|| config_file::extension_of(path))
            .unwrap_or_default();

        let parser = self
            .parser_for(extension)
            .ok_or_else(|| ConfigError::UnsupportedConfigType {
                extension: extension.to_string(),
            })?;

        config_file::load(path, parser)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("config_paths", &self.config_paths)
            .field("config_name", &self.config_name)
            .field("config_type", &self.config_type)
            .field("config_file", &self.config_file)
            .field("files_used", &self.files_used)
            .field("flag_bindings", &self.flag_bindings)
            .field("env_prefix", &self.env_prefix)
            .field("automatic_env", &self.automatic_env)
            .finish_non_exhaustive()
    }
}

impl SettingsBackend for Settings {
    fn add_config_path(&mut self, path: &str) {
        let expanded = config_file::expand_path(path);
        if self.config_paths.contains(&expanded) {
            return;
        }
        tracing::debug!("Adding config path {} ({})", path, expanded.display());
        self.config_paths.push(expanded);
    }

    fn set_config_type(&mut self, extension: &str) {
        self.config_type = Some(extension.trim_start_matches('.').to_string());
    }

    fn set_config_name(&mut self, name: &str) {
        self.config_name = name.to_string();
    }

    fn set_config_file(&mut self, path: &Path) {
        self.config_file = Some(path.to_path_buf());
    }

    fn bind_key_to_flag(&mut self, key: &ConfigKey, flag: &FlagHandle) -> Result<()> {
        if flag.name().is_empty() {
            return Err(ConfigError::InvalidFlag {
                key: key.to_string(),
                message: "flag identifier is empty".to_string(),
            });
        }
        self.flag_bindings.insert(key.normalized(), flag.clone());
        Ok(())
    }

    fn set_env_prefix(&mut self, prefix: &str) {
        self.env_prefix = prefix.to_string();
    }

    fn set_env_key_replacer(&mut self, replacer: KeyReplacer) {
        self.env_key_replacer = Some(replacer);
    }

    fn enable_automatic_env(&mut self) {
        self.automatic_env = true;
    }

    fn read_config(&mut self) -> Result<()> {
        self.file_values.clear();
        self.files_used.clear();
        let files = self.locate_files()?;

        let mut merged = HashMap::new();
        for path in &files {
            let values = self.read_file(path)?;
            tracing::debug!("Read {} keys from {}", values.len(), path.display());
            merged.extend(
                values
                    .into_iter()
                    .map(|(key, value)| (key.to_lowercase(), ConfigValue::from(value))),
            );
        }

        tracing::info!(
            "Loaded configuration from {}",
            files
                .iter()
                .map(|path| path.display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
        self.file_values = merged;
        self.files_used = files;
        Ok(())
    }
}

impl ConfigurationService for Settings {
    fn get(&self, key: &ConfigKey) -> Result<ConfigValue> {
        self.find(key).ok_or_else(|| key_not_found(key))
    }

    fn all_keys(&self) -> Vec<ConfigKey> {
        let keys: BTreeSet<&String> = self
            .overrides
            .keys()
            .chain(self.flag_bindings.keys())
            .chain(self.file_values.keys())
            .chain(self.defaults.keys())
            .collect();
        keys.into_iter().map(|key| ConfigKey::from(key.as_str())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FlagValue;
    use std::fs;
    use tempfile::TempDir;

    struct FixedFlags(HashMap<String, FlagValue>);

    impl FlagValues for FixedFlags {
        fn flag_value(&self, flag: &FlagHandle) -> Option<FlagValue> {
            self.0.get(flag.name()).cloned()
        }
    }

    fn flags(entries: &[(&str, &str, bool)]) -> FixedFlags {
        FixedFlags(
            entries
                .iter()
                .map(|(name, value, changed)| (name.to_string(), FlagValue::new(*value, *changed)))
                .collect(),
        )
    }

    fn value(settings: &Settings, key: &str) -> Option<String> {
        settings.get_str(key).ok().map(String::from)
    }

    #[test]
    fn test_empty_settings() {
        let settings = Settings::new();
        assert!(matches!(
            settings.get_str("missing"),
            Err(ConfigError::ConfigKeyNotFound { .. })
        ));
        assert!(settings.all_keys().is_empty());
    }

    #[test]
    fn test_keys_are_case_insensitive() {
        let mut settings = Settings::new();
        settings.set_default("Server.Port", "8080");
        assert_eq!(value(&settings, "SERVER.PORT").as_deref(), Some("8080"));
        assert_eq!(settings.all_keys(), vec![ConfigKey::from("server.port")]);
    }

    #[test]
    fn test_override_beats_changed_flag() {
        let mut settings = Settings::new();
        settings
            .bind_key_to_flag(&ConfigKey::from("port"), &FlagHandle::new("port"))
            .unwrap();
        settings.set_flag_values(flags(&[("port", "9000", true)]));
        assert_eq!(value(&settings, "port").as_deref(), Some("9000"));

        settings.set("port", "1");
        assert_eq!(value(&settings, "port").as_deref(), Some("1"));
    }

    #[test]
    fn test_unchanged_flag_ranks_below_default() {
        let mut settings = Settings::new();
        settings
            .bind_key_to_flag(&ConfigKey::from("port"), &FlagHandle::new("port"))
            .unwrap();
        settings.set_flag_values(flags(&[("port", "8080", false)]));
        assert_eq!(value(&settings, "port").as_deref(), Some("8080"));

        settings.set_default("port", "7000");
        assert_eq!(value(&settings, "port").as_deref(), Some("7000"));
    }

    #[test]
    fn test_flag_default_without_values() {
        let mut settings = Settings::new();
        let flag = FlagHandle::new("level").with_default("info");
        settings
            .bind_key_to_flag(&ConfigKey::from("log.level"), &flag)
            .unwrap();

        assert_eq!(value(&settings, "log.level").as_deref(), Some("info"));
        assert!(settings.has(&ConfigKey::from("log.level")));
    }

    #[test]
    fn test_bind_rejects_empty_flag() {
        let mut settings = Settings::new();
        let err = settings
            .bind_key_to_flag(&ConfigKey::from("port"), &FlagHandle::new(""))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFlag { .. }));
        assert!(settings.bound_flag(&ConfigKey::from("port")).is_none());
    }

    #[test]
    fn test_env_lookup_requires_automatic_env() {
        env::set_var("HEXBIND_SETTINGS_TEST_SERVER_PORT", "6000");

        let mut settings = Settings::new();
        settings.set_env_prefix("HEXBIND_SETTINGS_TEST_");
        settings.set_env_key_replacer(KeyReplacer::new([(".", "_")]));
        assert_eq!(value(&settings, "server.port"), None);

        settings.enable_automatic_env();
        assert_eq!(value(&settings, "server.port").as_deref(), Some("6000"));

        env::remove_var("HEXBIND_SETTINGS_TEST_SERVER_PORT");
    }

    #[test]
    fn test_empty_env_value_is_unset() {
        env::set_var("HEXBIND_SETTINGS_EMPTY_KEY", "");

        let mut settings = Settings::new();
        settings.set_env_prefix("HEXBIND_SETTINGS_EMPTY_");
        settings.enable_automatic_env();
        settings.set_default("key", "fallback");
        assert_eq!(value(&settings, "key").as_deref(), Some("fallback"));

        env::remove_var("HEXBIND_SETTINGS_EMPTY_KEY");
    }

    #[test]
    fn test_env_var_name_without_replacer() {
        let mut settings = Settings::new();
        settings.set_env_prefix("ACME_");
        assert_eq!(
            settings.env_var_name(&ConfigKey::from("server.port")),
            "ACME_SERVER.PORT"
        );
    }

    #[test]
    fn test_read_config_not_found() {
        let dir = TempDir::new().unwrap();
        let mut settings = Settings::new();
        settings.set_config_name("acme");
        settings.add_config_path(dir.path().to_str().unwrap());

        let err = settings.read_config().unwrap_err();
        assert!(err.is_not_found());
        assert!(settings.config_files_used().is_empty());
    }

    #[test]
    fn test_read_config_without_paths_is_not_found() {
        let mut settings = Settings::new();
        assert!(settings.read_config().unwrap_err().is_not_found());
    }

    #[test]
    #[cfg(feature = "yaml")]
    fn test_later_path_wins() {
        let system = TempDir::new().unwrap();
        let local = TempDir::new().unwrap();
        fs::write(
            system.path().join("acme.yaml"),
            "server:\n  port: 1\n  host: system\n",
        )
        .unwrap();
        fs::write(local.path().join("acme.yaml"), "server:\n  port: 2\n").unwrap();

        let mut settings = Settings::new();
        settings.set_config_name("acme");
        settings.set_config_type("yaml");
        settings.add_config_path(system.path().to_str().unwrap());
        settings.add_config_path(local.path().to_str().unwrap());
        settings.read_config().unwrap();

        assert_eq!(value(&settings, "server.port").as_deref(), Some("2"));
        assert_eq!(value(&settings, "server.host").as_deref(), Some("system"));
        assert_eq!(settings.config_files_used().len(), 2);
    }

    #[test]
    #[cfg(feature = "yaml")]
    fn test_file_ranks_between_env_and_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.yml"), "mode: file\nlevel: file\n").unwrap();
        env::set_var("HEXBIND_RANK_MODE", "env");

        let mut settings = Settings::new();
        settings.add_config_path(dir.path().to_str().unwrap());
        settings.set_env_prefix("HEXBIND_RANK_");
        settings.enable_automatic_env();
        settings.set_default("level", "default");
        settings.set_default("other", "default");
        settings.read_config().unwrap();

        assert_eq!(value(&settings, "mode").as_deref(), Some("env"));
        assert_eq!(value(&settings, "level").as_deref(), Some("file"));
        assert_eq!(value(&settings, "other").as_deref(), Some("default"));

        env::remove_var("HEXBIND_RANK_MODE");
    }

    #[test]
    #[cfg(feature = "yaml")]
    fn test_forced_file_bypasses_discovery() {
        let dir = TempDir::new().unwrap();
        let forced = dir.path().join("custom.yml");
        fs::write(&forced, "source: forced\n").unwrap();
        fs::write(dir.path().join("acme.yaml"), "source: discovered\n").unwrap();

        let mut settings = Settings::new();
        settings.set_config_name("acme");
        settings.add_config_path(dir.path().to_str().unwrap());
        settings.set_config_file(&forced);
        settings.read_config().unwrap();

        assert_eq!(value(&settings, "source").as_deref(), Some("forced"));
        assert_eq!(settings.config_files_used(), [forced]);
    }

    #[test]
    fn test_missing_forced_file_is_read_error() {
        let mut settings = Settings::new();
        settings.set_config_file(Path::new("/nonexistent/acme.yaml"));

        let err = settings.read_config().unwrap_err();
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_unsupported_config_type() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("acme.ini");
        fs::write(&path, "a=1").unwrap();

        let mut settings = Settings::new();
        settings.set_config_file(&path);

        let err = settings.read_config().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnsupportedConfigType { ref extension } if extension == "ini"
        ));
    }

    #[test]
    #[cfg(feature = "yaml")]
    fn test_malformed_file_is_surfaced() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.yaml"), "key: [unclosed\n").unwrap();

        let mut settings = Settings::new();
        settings.add_config_path(dir.path().to_str().unwrap());

        let err = settings.read_config().unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn test_duplicate_config_path_is_ignored() {
        let mut settings = Settings::new();
        settings.add_config_path("/etc/acme");
        settings.add_config_path("/srv/acme");
        settings.add_config_path("/etc/acme");

        assert_eq!(
            settings.config_paths(),
            [PathBuf::from("/etc/acme"), PathBuf::from("/srv/acme")]
        );
    }

    #[test]
    #[cfg(feature = "yaml")]
    fn test_file_layer_is_dropped_when_file_disappears() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("acme.yaml");
        fs::write(&path, "mode: file\n").unwrap();

        let mut settings = Settings::new();
        settings.set_config_name("acme");
        settings.add_config_path(dir.path().to_str().unwrap());
        settings.read_config().unwrap();
        assert_eq!(value(&settings, "mode").as_deref(), Some("file"));

        fs::remove_file(&path).unwrap();
        assert!(settings.read_config().unwrap_err().is_not_found());
        assert_eq!(value(&settings, "mode"), None);
        assert!(settings.config_files_used().is_empty());
    }

    #[test]
    fn test_settings_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Settings>();
    }
}
