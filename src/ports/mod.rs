// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! These traits are the boundaries of the composition engine: the command tree
//! it resolves flags in, the settings backend it configures, the initializers
//! that configure it, and the parsers and flag value providers the default
//! backend relies on. Adapters implement them.

pub mod backend;
pub mod command;
pub mod flags;
pub mod initializer;
pub mod parser;

// Re-export commonly used types
pub use backend::SettingsBackend;
pub use command::CommandNode;
pub use flags::FlagValues;
pub use initializer::Initializer;
pub use parser::ConfigParser;
