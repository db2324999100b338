// SPDX-License-Identifier: MIT OR Apache-2.0

//! Flag value port.
//!
//! Flag handles only describe where a flag lives. The parsed values come from
//! a [`FlagValues`] provider, typically the argument parser's match results.

use crate::domain::{FlagHandle, FlagValue};

/// Supplies the current value of bound flags.
pub trait FlagValues: Send + Sync {
    /// Returns the value of `flag`, or `None` if the parser knows no value for
    /// it (for example when its subcommand was not invoked).
    fn flag_value(&self, flag: &FlagHandle) -> Option<FlagValue>;
}
