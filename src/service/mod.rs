// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer containing the configuration aggregator.
//!
//! [`Configuration`] ties the pieces together: it owns the settings backend,
//! applies the source initializers in order and reads the configuration file.

pub mod configuration;

// Re-export commonly used types
pub use configuration::{Configuration, ConfigurationBuilder};
