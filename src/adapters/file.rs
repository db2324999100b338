// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration file initializer.

use crate::domain::Result;
use crate::ports::{Initializer, SettingsBackend};

/// Extension of the default configuration file
pub const DEFAULT_EXTENSION: &str = "yaml";

/// Tells the backend where to look for the configuration file.
///
/// Search paths are templates expanded by the backend; paths later in the
/// list take precedence over earlier ones.
///
/// # Examples
///
/// ```rust
/// use hexbind::adapters::FileInitializer;
///
/// let file = FileInitializer::for_application("acme");
/// assert_eq!(file.name, "acme");
/// assert_eq!(file.extension, "yaml");
/// assert_eq!(
///     file.paths,
///     vec!["/etc/acme", "$XDG_CONFIG_HOME/acme", "$HOME/.acme", "."]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInitializer {
    /// Base name of the file, without extension.
    pub name: String,
    /// File type, also used as the extension.
    pub extension: String,
    /// Search path templates, lowest precedence first.
    pub paths: Vec<String>,
}

impl FileInitializer {
    /// Creates an initializer for an explicit name, type and search paths.
    pub fn new(name: impl Into<String>, extension: impl Into<String>, paths: Vec<String>) -> Self {
        Self {
            name: name.into(),
            extension: extension.into(),
            paths,
        }
    }

    /// Default layout for an application: a YAML file named after it, looked
    /// up in the system, XDG, home-dotfile and current directories, in that
    /// order of increasing precedence.
    pub fn for_application(application_name: &str) -> Self {
        Self::new(
            application_name,
            DEFAULT_EXTENSION,
            vec![
                format!("/etc/{}", application_name),
                format!("$XDG_CONFIG_HOME/{}", application_name),
                format!("$HOME/.{}", application_name),
                ".".to_string(),
            ],
        )
    }
}

impl Initializer for FileInitializer {
    fn name(&self) -> &str {
        "file"
    }

    fn initialize(&self, backend: &mut dyn SettingsBackend) -> Result<()> {
        for path in &self.paths {
            backend.add_config_path(path);
        }
        backend.set_config_type(&self.extension);
        backend.set_config_name(&self.name);
        tracing::debug!(
            "Searching for {}.{} in {} paths",
            self.name,
            self.extension,
            self.paths.len()
        );
        Ok(())
    }
}
