// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration for command-line applications.
//!
//! This crate composes one settings store out of command-line flags,
//! environment variables and configuration files. Nested subcommand flags are
//! named with dotted paths (`server.admin.token`), resolved once against the
//! command tree and bound to configuration keys, so the application reads every
//! value through a single key space regardless of where it came from.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: keys, values, bindings, errors and the command-line key
//!   resolver (`find_flag`, `build_bindings`)
//! - **Ports**: trait definitions for the command tree (`CommandNode`), the
//!   settings backend (`SettingsBackend`), source initializers (`Initializer`),
//!   flag value providers (`FlagValues`) and file parsers (`ConfigParser`)
//! - **Adapters**: the default `Settings` backend, the flag, file and
//!   environment initializers, the YAML parser and the `clap` adapter
//! - **Service**: the `Configuration` aggregator that runs the initializers and
//!   reads the configuration file
//!
//! # Precedence
//!
//! Values are resolved from the first source that has one: explicit overrides,
//! flags set on the command line, environment variables, configuration files,
//! defaults, and finally the default value of a bound flag.
//!
//! # Feature Flags
//!
//! - `yaml`: Enable YAML configuration files (default)
//! - `env`: Enable the environment variable initializer (default)
//! - `cli`: Enable the `clap` adapter (default)
//! - `full`: Enable all features
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use clap::{Arg, Command};
//! use hexbind::prelude::*;
//!
//! # fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let cli = Command::new("acme").subcommand(
//!     Command::new("server").arg(Arg::new("port").long("port").default_value("8080")),
//! );
//!
//! let bindings = [Binding::new("server.port", "server.port")];
//! let mut config = Configuration::with_defaults("acme", &cli, &bindings)?;
//!
//! config.backend_mut().set_flag_values(cli.get_matches());
//! config.read_configuration()?;
//!
//! let port = config.backend().get_str("server.port")?.as_u64("server.port")?;
//! println!("listening on {}", port);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::domain::{
        build_bindings, find_flag, Binding, CommandLineKey, ConfigError, ConfigKey, ConfigValue,
        ConfigurationService, FlagHandle, ResolvedFlagMap, Result,
    };
    pub use crate::ports::{CommandNode, ConfigParser, FlagValues, Initializer, SettingsBackend};
    pub use crate::service::Configuration;

    pub use crate::adapters::{FileInitializer, FlagInitializer, Settings};
    // Re-export adapters based on feature flags
    #[cfg(feature = "env")]
    pub use crate::adapters::EnvironmentInitializer;
    #[cfg(feature = "yaml")]
    pub use crate::adapters::YamlParser;
}
