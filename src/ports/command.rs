// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command tree port.
//!
//! The resolver walks an application's command hierarchy through this trait,
//! so it works with any argument parser that can describe its commands.

use crate::domain::FlagHandle;

/// One node of a command tree.
///
/// # Examples
///
/// ```rust
/// use hexbind::domain::FlagHandle;
/// use hexbind::ports::CommandNode;
///
/// struct Node {
///     name: &'static str,
///     flags: Vec<&'static str>,
///     children: Vec<Node>,
/// }
///
/// impl CommandNode for Node {
///     fn name(&self) -> &str {
///         self.name
///     }
///
///     fn children(&self) -> Vec<&Self> {
///         self.children.iter().collect()
///     }
///
///     fn lookup_flag(&self, name: &str) -> Option<FlagHandle> {
///         self.flags.iter().find(|f| **f == name).map(|f| FlagHandle::new(*f))
///     }
/// }
/// ```
pub trait CommandNode {
    /// The name under which this command is invoked.
    fn name(&self) -> &str;

    /// Immediate subcommands, in declaration order.
    fn children(&self) -> Vec<&Self>;

    /// Looks up a flag owned by this command, including flags inherited
    /// from its ancestors.
    fn lookup_flag(&self, name: &str) -> Option<FlagHandle>;
}
