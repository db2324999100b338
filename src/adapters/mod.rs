// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing concrete implementations of the ports.
//!
//! [`Settings`] is the default settings backend. The three source initializers
//! configure it from flags, files and the environment, and the `cli` adapter
//! lets a `clap` command tree act as the command tree provider.

#[cfg(feature = "cli")]
pub mod cli;
pub mod config_file;
#[cfg(feature = "env")]
pub mod env_var;
pub mod file;
pub mod flag_binding;
pub mod settings;
#[cfg(feature = "yaml")]
pub mod yaml_file;

// Re-export adapters based on feature flags
#[cfg(feature = "env")]
pub use env_var::EnvironmentInitializer;
pub use file::FileInitializer;
pub use flag_binding::FlagInitializer;
pub use settings::Settings;
#[cfg(feature = "yaml")]
pub use yaml_file::YamlParser;
