// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line key resolution.
//!
//! Maps a dotted command-line key such as `server.listen.port` onto the flag
//! `port` of the subcommand `listen` of the subcommand `server`, and builds the
//! flag map for a whole list of bindings.

use crate::domain::{Binding, ConfigError, FlagHandle, ResolvedFlagMap, Result};
use crate::ports::CommandNode;

/// Finds the flag identified by `flag_path` below `root`.
///
/// Every segment but the last must name a subcommand; the last segment is
/// looked up as a flag on the command reached that way. A missing flag is
/// `Ok(None)`, a missing subcommand is an error naming the segment.
///
/// # Examples
///
/// ```rust
/// # #[cfg(feature = "cli")]
/// # {
/// use clap::{Arg, Command};
/// use hexbind::domain::resolver::find_flag;
///
/// let root = Command::new("acme")
///     .subcommand(Command::new("server").arg(Arg::new("port").long("port")));
///
/// let flag = find_flag(&root, "server.port").unwrap().unwrap();
/// assert_eq!(flag.command_path(), ["server"]);
/// assert!(find_flag(&root, "server.timeout").unwrap().is_none());
/// assert!(find_flag(&root, "database.port").is_err());
/// # }
/// ```
pub fn find_flag<C: CommandNode>(root: &C, flag_path: &str) -> Result<Option<FlagHandle>> {
    find_flag_in(root, flag_path, &mut Vec::new())
}

fn find_flag_in<C: CommandNode>(
    cmd: &C,
    flag_path: &str,
    trail: &mut Vec<String>,
) -> Result<Option<FlagHandle>> {
    let Some((segment, rest)) = flag_path.split_once('.') else {
        return Ok(cmd
            .lookup_flag(flag_path)
            .map(|flag| flag.within(trail.clone())));
    };

    let sub = find_subcommand(cmd, segment).ok_or_else(|| ConfigError::SubcommandNotFound {
        segment: segment.to_string(),
    })?;

    trail.push(segment.to_string());
    find_flag_in(sub, rest, trail).map_err(|e| ConfigError::CommandPath {
        segment: segment.to_string(),
        source: Box::new(e),
    })
}

/// First child of `cmd` named `name`, in declaration order.
fn find_subcommand<'a, C: CommandNode>(cmd: &'a C, name: &str) -> Option<&'a C> {
    cmd.children().into_iter().find(|child| child.name() == name)
}

/// Resolves every binding against `root`.
///
/// Stops at the first binding that does not resolve to a flag and returns its
/// error wrapped with the binding's configuration key; no partial map is
/// returned. Duplicate configuration keys keep the last binding.
pub fn build_bindings<C: CommandNode>(root: &C, bindings: &[Binding]) -> Result<ResolvedFlagMap> {
    let mut resolved = ResolvedFlagMap::new();
    for binding in bindings {
        let path = binding.command_line_key.as_str();
        let flag = find_flag(root, path)
            .and_then(|flag| {
                flag.ok_or_else(|| ConfigError::FlagNotFound {
                    path: path.to_string(),
                })
            })
            .map_err(|e| ConfigError::BindingResolution {
                key: binding.configuration_key.to_string(),
                source: Box::new(e),
            })?;

        tracing::debug!(
            "Resolved command-line key '{}' to flag '{}' for '{}'",
            path,
            flag,
            binding.configuration_key
        );
        resolved.insert(binding.configuration_key.clone(), flag);
    }
    Ok(resolved)
}
