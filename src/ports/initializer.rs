// SPDX-License-Identifier: MIT OR Apache-2.0

//! Source initializer port.
//!
//! An initializer configures one aspect of a [`SettingsBackend`]: flag
//! bindings, environment lookup, or file discovery.

use crate::domain::Result;
use crate::ports::SettingsBackend;

/// Configures one source of a settings backend.
///
/// Initializers target disjoint parts of the backend, so applying one twice or
/// in a different order leaves the backend in the same state.
///
/// # Examples
///
/// ```rust
/// use hexbind::domain::Result;
/// use hexbind::ports::{Initializer, SettingsBackend};
///
/// struct SystemDefaults;
///
/// impl Initializer for SystemDefaults {
///     fn name(&self) -> &str {
///         "system-defaults"
///     }
///
///     fn initialize(&self, backend: &mut dyn SettingsBackend) -> Result<()> {
///         backend.add_config_path("/usr/share/acme");
///         Ok(())
///     }
/// }
/// ```
pub trait Initializer {
    /// Short name used in logs and error context.
    fn name(&self) -> &str;

    /// Applies this initializer to the backend.
    fn initialize(&self, backend: &mut dyn SettingsBackend) -> Result<()>;
}
