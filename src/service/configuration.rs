// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration aggregator.
//!
//! [`Configuration`] owns a settings backend and the ordered list of source
//! initializers that configure it. Reading the configuration applies every
//! initializer and then asks the backend to load its file.

use crate::adapters::{FileInitializer, FlagInitializer, Settings};
use crate::domain::{build_bindings, Binding, ConfigError, ResolvedFlagMap, Result};
use crate::ports::{CommandNode, Initializer, SettingsBackend};
use std::fmt;
use std::path::{Path, PathBuf};

/// Composes flags, environment and files into one settings backend.
///
/// # Examples
///
/// ```rust
/// use hexbind::prelude::*;
/// use hexbind::service::Configuration;
///
/// # fn main() -> Result<()> {
/// let mut config = Configuration::new(Configuration::default_initializers(
///     "acme",
///     ResolvedFlagMap::new(),
/// ));
/// config.read_configuration()?;
///
/// let settings = config.into_backend();
/// assert!(settings.get_str("server.port").is_err());
/// # Ok(())
/// # }
/// ```
pub struct Configuration<B: SettingsBackend = Settings> {
    backend: B,
    forced_file: Option<PathBuf>,
    initializers: Vec<Box<dyn Initializer>>,
}

impl Configuration<Settings> {
    /// Creates an aggregator over a fresh [`Settings`] backend.
    pub fn new(initializers: Vec<Box<dyn Initializer>>) -> Self {
        Self::with_backend(Settings::new(), initializers)
    }

    /// Creates a builder over a fresh [`Settings`] backend.
    pub fn builder() -> ConfigurationBuilder<Settings> {
        ConfigurationBuilder::new(Settings::new())
    }

    /// The three standard initializers for an application, in order:
    /// flag bindings, file discovery and environment lookup.
    ///
    /// The environment initializer is only included with the `env` feature.
    pub fn default_initializers(
        application_name: &str,
        flags: ResolvedFlagMap,
    ) -> Vec<Box<dyn Initializer>> {
        let mut initializers: Vec<Box<dyn Initializer>> = vec![
            Box::new(FlagInitializer::new(flags)),
            Box::new(FileInitializer::for_application(application_name)),
        ];
        #[cfg(feature = "env")]
        initializers.push(Box::new(
            crate::adapters::EnvironmentInitializer::for_application(application_name),
        ));
        initializers
    }

    /// Resolves `bindings` against the command tree rooted at `root` and
    /// builds an aggregator with the standard initializers.
    ///
    /// Fails without side effects if any binding cannot be resolved.
    pub fn with_defaults<C: CommandNode>(
        application_name: &str,
        root: &C,
        bindings: &[Binding],
    ) -> Result<Self> {
        let flags = build_bindings(root, bindings)?;
        tracing::debug!(
            "Resolved {} flag bindings for {}",
            flags.len(),
            application_name
        );
        Ok(Self::new(Self::default_initializers(
            application_name,
            flags,
        )))
    }
}

impl<B: SettingsBackend> Configuration<B> {
    /// Creates an aggregator over an existing backend.
    pub fn with_backend(backend: B, initializers: Vec<Box<dyn Initializer>>) -> Self {
        Self {
            backend,
            forced_file: None,
            initializers,
        }
    }

    /// Forces a specific configuration file, bypassing discovery.
    pub fn set_forced_file(&mut self, path: impl Into<PathBuf>) {
        self.forced_file = Some(path.into());
    }

    /// The forced configuration file, if any.
    pub fn forced_file(&self) -> Option<&Path> {
        self.forced_file.as_deref()
    }

    /// Names of the registered initializers, in application order.
    pub fn initializer_names(&self) -> Vec<&str> {
        self.initializers.iter().map(|i| i.name()).collect()
    }

    /// Applies the forced file and every initializer to `backend`, without
    /// reading any configuration.
    pub fn initialize(&self, backend: &mut dyn SettingsBackend) -> Result<()> {
        apply(self.forced_file.as_deref(), &self.initializers, backend)
    }

    /// Configures the owned backend and reads the configuration file.
    ///
    /// A configuration file that does not exist is not an error; a forced file
    /// that does not exist is.
    pub fn read_configuration(&mut self) -> Result<()> {
        apply(
            self.forced_file.as_deref(),
            &self.initializers,
            &mut self.backend,
        )?;

        match self.backend.read_config() {
            Err(e) if e.is_not_found() => {
                tracing::debug!("No configuration file read: {}", e);
                Ok(())
            }
            other => other,
        }
    }

    /// The owned backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable access to the owned backend.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Consumes the aggregator, returning the backend.
    pub fn into_backend(self) -> B {
        self.backend
    }
}

fn apply(
    forced_file: Option<&Path>,
    initializers: &[Box<dyn Initializer>],
    backend: &mut dyn SettingsBackend,
) -> Result<()> {
    if let Some(path) = forced_file {
        tracing::debug!("Using forced configuration file {}", path.display());
        backend.set_config_file(path);
    }

    for initializer in initializers {
        tracing::debug!("Applying initializer {}", initializer.name());
        initializer
            .initialize(backend)
            .map_err(|e| ConfigError::Initializer {
                initializer: initializer.name().to_string(),
                source: Box::new(e),
            })?;
    }
    Ok(())
}

impl<B: SettingsBackend + fmt::Debug> fmt::Debug for Configuration<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("backend", &self.backend)
            .field("forced_file", &self.forced_file)
            .field("initializers", &self.initializer_names())
            .finish()
    }
}

/// Builder for [`Configuration`].
///
/// # Examples
///
/// ```rust
/// use hexbind::adapters::FileInitializer;
/// use hexbind::service::Configuration;
///
/// let config = Configuration::builder()
///     .with_initializer(FileInitializer::for_application("acme"))
///     .with_forced_file("/etc/acme/override.yaml")
///     .build();
/// assert_eq!(config.initializer_names(), vec!["file"]);
/// ```
pub struct ConfigurationBuilder<B: SettingsBackend = Settings> {
    backend: B,
    forced_file: Option<PathBuf>,
    initializers: Vec<Box<dyn Initializer>>,
}

impl<B: SettingsBackend> ConfigurationBuilder<B> {
    /// Creates a builder over `backend` with no initializers.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            forced_file: None,
            initializers: Vec::new(),
        }
    }

    /// Appends an initializer. Initializers run in the order they are added.
    pub fn with_initializer(mut self, initializer: impl Initializer + 'static) -> Self {
        self.initializers.push(Box::new(initializer));
        self
    }

    /// Appends several boxed initializers.
    pub fn with_initializers(mut self, initializers: Vec<Box<dyn Initializer>>) -> Self {
        self.initializers.extend(initializers);
        self
    }

    /// Forces a specific configuration file.
    pub fn with_forced_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.forced_file = Some(path.into());
        self
    }

    /// Builds the aggregator.
    pub fn build(self) -> Configuration<B> {
        Configuration {
            backend: self.backend,
            forced_file: self.forced_file,
            initializers: self.initializers,
        }
    }
}

impl Default for ConfigurationBuilder<Settings> {
    fn default() -> Self {
        Self::new(Settings::new())
    }
}
