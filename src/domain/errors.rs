// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the configuration crate.
//!
//! Every failure of the composition pass, from resolving a command-line key to
//! reading the active configuration file, is reported through [`ConfigError`].
//! Wrapping variants keep the failing key, path segment or initializer name so a
//! failure can be diagnosed from its message alone.

use std::num::{ParseFloatError, ParseIntError};
use std::path::PathBuf;
use std::str::ParseBoolError;
use thiserror::Error;

/// The main error type for configuration operations.
///
/// It is marked as `#[non_exhaustive]` to allow for future additions without
/// breaking backwards compatibility.
///
/// # Examples
///
/// ```
/// use hexbind::domain::errors::ConfigError;
///
/// let error = ConfigError::BindingResolution {
///     key: "server.port".to_string(),
///     source: Box::new(ConfigError::SubcommandNotFound {
///         segment: "server".to_string(),
///     }),
/// };
/// assert_eq!(error.failing_segment(), Some("server"));
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A path segment named a subcommand that does not exist on the current command.
    #[error("subcommand '{segment}' not found")]
    SubcommandNotFound {
        /// The segment that named the missing subcommand
        segment: String,
    },

    /// Resolution failed somewhere below the named subcommand.
    #[error("search '{segment}'")]
    CommandPath {
        /// The subcommand segment that was entered before the failure
        segment: String,
        /// The failure reported from inside the subcommand
        #[source]
        source: Box<ConfigError>,
    },

    /// A command-line key resolved to a command that has no such flag.
    #[error("no flag found for command-line key '{path}'")]
    FlagNotFound {
        /// The full dotted command-line key
        path: String,
    },

    /// A binding could not be resolved against the command tree.
    #[error("failed to resolve binding for configuration key '{key}'")]
    BindingResolution {
        /// The configuration key of the offending binding
        key: String,
        /// The underlying resolution error
        #[source]
        source: Box<ConfigError>,
    },

    /// The settings backend rejected a flag handle.
    #[error("invalid flag for configuration key '{key}': {message}")]
    InvalidFlag {
        /// The configuration key being bound
        key: String,
        /// Why the handle was rejected
        message: String,
    },

    /// Binding a configuration key to a flag failed.
    #[error("bind flag {{cli: {flag}, cfg: {key}}}")]
    FlagBinding {
        /// The configuration key being bound
        key: String,
        /// Identifier of the flag being bound
        flag: String,
        /// The backend error
        #[source]
        source: Box<ConfigError>,
    },

    /// A source initializer failed to configure the backend.
    #[error("initializer '{initializer}' failed")]
    Initializer {
        /// Name of the failing initializer
        initializer: String,
        /// The underlying error
        #[source]
        source: Box<ConfigError>,
    },

    /// No configuration file was found in any search location.
    #[error("config file '{name}' not found in {locations:?}")]
    ConfigFileNotFound {
        /// The configuration file base name that was searched for
        name: String,
        /// The locations that were searched, in search order
        locations: Vec<String>,
    },

    /// A configuration file exists but could not be read.
    #[error("failed to read config file '{}': {message}", path.display())]
    FileRead {
        /// Path to the file
        path: PathBuf,
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// No parser is registered for the configuration type.
    #[error("unsupported config type '{extension}'")]
    UnsupportedConfigType {
        /// The configuration type or file extension
        extension: String,
    },

    /// Failed to parse a configuration file or value.
    #[error("Failed to parse configuration: {message}")]
    ParseError {
        /// The error message
        message: String,
        /// The underlying parsing error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The requested configuration key was not found in any source.
    #[error("Configuration key not found: {key}")]
    ConfigKeyNotFound {
        /// The key that was not found
        key: String,
    },

    /// Failed to convert a configuration value to the requested type.
    #[error(
        "Failed to convert configuration value for key '{key}' to type {target_type}: {source}"
    )]
    TypeConversionError {
        /// The key being converted
        key: String,
        /// The target type name
        target_type: String,
        /// The underlying conversion error
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ConfigError {
    /// Returns `true` when no configuration file was found.
    ///
    /// The aggregator uses this to tolerate a missing file while still
    /// surfacing every other read failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ConfigError::ConfigFileNotFound { .. })
    }

    /// Returns the subcommand segment that could not be found, looking
    /// through any wrapping context.
    pub fn failing_segment(&self) -> Option<&str> {
        match self {
            ConfigError::SubcommandNotFound { segment } => Some(segment.as_str()),
            ConfigError::CommandPath { source, .. }
            | ConfigError::BindingResolution { source, .. }
            | ConfigError::FlagBinding { source, .. }
            | ConfigError::Initializer { source, .. } => source.failing_segment(),
            _ => None,
        }
    }

    /// Creates a TypeConversionError from a ParseIntError.
    pub fn from_parse_int_error(key: String, err: ParseIntError) -> Self {
        ConfigError::TypeConversionError {
            key,
            target_type: "integer".to_string(),
            source: Box::new(err),
        }
    }

    /// Creates a TypeConversionError from a ParseFloatError.
    pub fn from_parse_float_error(key: String, err: ParseFloatError) -> Self {
        ConfigError::TypeConversionError {
            key,
            target_type: "float".to_string(),
            source: Box::new(err),
        }
    }

    /// Creates a TypeConversionError from a ParseBoolError.
    pub fn from_parse_bool_error(key: String, err: ParseBoolError) -> Self {
        ConfigError::TypeConversionError {
            key,
            target_type: "boolean".to_string(),
            source: Box::new(err),
        }
    }
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
