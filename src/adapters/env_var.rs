// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment variable initializer.

use crate::domain::{KeyReplacer, Result};
use crate::ports::{Initializer, SettingsBackend};

/// Makes every configuration key resolvable from a prefixed environment
/// variable.
///
/// The variable name is the prefix followed by the key with `.` replaced by
/// `_`, uppercased: with prefix `ACME_` the key `server.port` reads
/// `ACME_SERVER_PORT`.
///
/// # Examples
///
/// ```rust
/// use hexbind::adapters::{EnvironmentInitializer, Settings};
/// use hexbind::domain::ConfigKey;
/// use hexbind::ports::Initializer;
///
/// let env = EnvironmentInitializer::for_application("acme");
/// assert_eq!(env.prefix, "ACME_");
///
/// let mut settings = Settings::new();
/// env.initialize(&mut settings).unwrap();
/// assert_eq!(settings.env_var_name(&ConfigKey::from("server.port")), "ACME_SERVER_PORT");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentInitializer {
    /// Prefix of every environment variable read.
    pub prefix: String,
}

impl EnvironmentInitializer {
    /// Creates an initializer with an explicit prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Uses the uppercased application name followed by `_` as prefix.
    pub fn for_application(application_name: &str) -> Self {
        Self::with_prefix(format!("{}_", application_name.to_uppercase()))
    }
}

impl Initializer for EnvironmentInitializer {
    fn name(&self) -> &str {
        "env"
    }

    fn initialize(&self, backend: &mut dyn SettingsBackend) -> Result<()> {
        backend.set_env_prefix(&self.prefix);
        backend.set_env_key_replacer(KeyReplacer::new([(".", "_")]));
        backend.enable_automatic_env();
        tracing::debug!("Enabled environment lookup with prefix {}", self.prefix);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::Settings;
    use crate::domain::{ConfigKey, ConfigurationService};
    use std::env;

    #[test]
    fn test_prefix_from_application_name() {
        assert_eq!(
            EnvironmentInitializer::for_application("my-app").prefix,
            "MY-APP_"
        );
    }

    #[test]
    fn test_enables_automatic_env() {
        let mut settings = Settings::new();
        assert!(!settings.automatic_env());

        EnvironmentInitializer::for_application("acme")
            .initialize(&mut settings)
            .unwrap();
        assert!(settings.automatic_env());
    }

    #[test]
    fn test_undeclared_key_resolves_from_env() {
        env::set_var("HEXBIND_ENVINIT_CACHE_TTL_SECS", "30");

        let mut settings = Settings::new();
        EnvironmentInitializer::with_prefix("HEXBIND_ENVINIT_")
            .initialize(&mut settings)
            .unwrap();

        let value = settings.get(&ConfigKey::from("cache.ttl_secs")).unwrap();
        assert_eq!(value.as_u64("cache.ttl_secs").unwrap(), 30);

        env::remove_var("HEXBIND_ENVINIT_CACHE_TTL_SECS");
    }
}
