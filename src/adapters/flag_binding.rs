// SPDX-License-Identifier: MIT OR Apache-2.0

//! Flag binding initializer.

use crate::domain::{ConfigError, ResolvedFlagMap, Result};
use crate::ports::{Initializer, SettingsBackend};

/// Binds every resolved flag to its configuration key on the backend.
///
/// # Examples
///
/// ```rust
/// use hexbind::adapters::{FlagInitializer, Settings};
/// use hexbind::domain::{ConfigKey, FlagHandle, ResolvedFlagMap};
/// use hexbind::ports::Initializer;
///
/// let mut flags = ResolvedFlagMap::new();
/// flags.insert(ConfigKey::from("server.port"), FlagHandle::new("port").with_default("8080"));
///
/// let mut settings = Settings::new();
/// FlagInitializer::new(flags).initialize(&mut settings).unwrap();
/// assert!(settings.bound_flag(&ConfigKey::from("server.port")).is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct FlagInitializer {
    bindings: ResolvedFlagMap,
}

impl FlagInitializer {
    /// Creates an initializer for the given resolved flags.
    pub fn new(bindings: ResolvedFlagMap) -> Self {
        Self { bindings }
    }

    /// The flags this initializer binds.
    pub fn bindings(&self) -> &ResolvedFlagMap {
        &self.bindings
    }
}

impl Initializer for FlagInitializer {
    fn name(&self) -> &str {
        "flags"
    }

    fn initialize(&self, backend: &mut dyn SettingsBackend) -> Result<()> {
        for (key, flag) in &self.bindings {
            backend
                .bind_key_to_flag(key, flag)
                .map_err(|e| ConfigError::FlagBinding {
                    key: key.to_string(),
                    flag: flag.to_string(),
                    source: Box::new(e),
                })?;
        }
        tracing::debug!("Bound {} flags", self.bindings.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::Settings;
    use crate::domain::{ConfigKey, FlagHandle};

    #[test]
    fn test_binds_all_flags() {
        let flags: ResolvedFlagMap = vec![
            (ConfigKey::from("a"), FlagHandle::new("a")),
            (ConfigKey::from("b"), FlagHandle::new("b")),
        ]
        .into_iter()
        .collect();

        let mut settings = Settings::new();
        FlagInitializer::new(flags).initialize(&mut settings).unwrap();

        assert_eq!(
            settings.bound_flag(&ConfigKey::from("b")).unwrap().name(),
            "b"
        );
    }

    #[test]
    fn test_rejected_flag_is_wrapped() {
        let flags: ResolvedFlagMap = vec![(
            ConfigKey::from("server.port"),
            FlagHandle::new("").within(vec!["server".to_string()]),
        )]
        .into_iter()
        .collect();

        let mut settings = Settings::new();
        let err = FlagInitializer::new(flags)
            .initialize(&mut settings)
            .unwrap_err();

        let ConfigError::FlagBinding { key, flag, source } = err else {
            panic!("expected a flag binding error");
        };
        assert_eq!(key, "server.port");
        assert_eq!(flag, "server.");
        assert!(matches!(*source, ConfigError::InvalidFlag { .. }));
    }

    #[test]
    fn test_empty_bindings() {
        let mut settings = Settings::new();
        assert!(FlagInitializer::default().initialize(&mut settings).is_ok());
        assert_eq!(FlagInitializer::default().name(), "flags");
    }
}
