// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core types and logic.
//!
//! Keys, values, bindings and errors live here, together with the command-line
//! key resolver. Nothing in this module depends on a concrete argument parser
//! or file format.

pub mod binding;
pub mod config_key;
pub mod config_value;
pub mod errors;
pub mod key_replacer;
pub mod resolver;
pub mod service;

// Re-export commonly used types
pub use binding::{Binding, CommandLineKey, FlagHandle, FlagValue, ResolvedFlagMap};
pub use config_key::ConfigKey;
pub use config_value::ConfigValue;
pub use errors::{ConfigError, Result};
pub use key_replacer::KeyReplacer;
pub use resolver::{build_bindings, find_flag};
pub use service::ConfigurationService;
