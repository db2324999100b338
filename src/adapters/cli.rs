// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line adapter for `clap`.
//!
//! A [`clap::Command`] tree is a [`CommandNode`] and parsed
//! [`clap::ArgMatches`] are a [`FlagValues`] provider, so flags declared with
//! clap can be bound to configuration keys directly.
//!
//! Arguments marked `global(true)` only appear on subcommands after clap has
//! propagated them; call [`Command::build`] on the root before resolving keys
//! that refer to global arguments through a subcommand.

use crate::domain::{FlagHandle, FlagValue};
use crate::ports::{CommandNode, FlagValues};
use clap::parser::ValueSource;
use clap::{ArgMatches, Command};

impl CommandNode for Command {
    fn name(&self) -> &str {
        self.get_name()
    }

    fn children(&self) -> Vec<&Self> {
        self.get_subcommands().collect()
    }

    fn lookup_flag(&self, name: &str) -> Option<FlagHandle> {
        let arg = self
            .get_arguments()
            .find(|arg| arg.get_id().as_str() == name || arg.get_long() == Some(name))?;

        let flag = FlagHandle::new(arg.get_id().as_str());
        let defaults: Vec<String> = arg
            .get_default_values()
            .iter()
            .map(|value| value.to_string_lossy().into_owned())
            .collect();

        Some(if defaults.is_empty() {
            flag
        } else {
            flag.with_default(defaults.join(","))
        })
    }
}

impl FlagValues for ArgMatches {
    fn flag_value(&self, flag: &FlagHandle) -> Option<FlagValue> {
        let mut matches = self;
        for segment in flag.command_path() {
            matches = matches.subcommand_matches(segment)?;
        }

        let raw = matches.try_get_raw(flag.name()).ok()??;
        let value = raw
            .map(|value| value.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(",");

        let changed = matches!(
            matches.value_source(flag.name()),
            Some(ValueSource::CommandLine) | Some(ValueSource::EnvVariable)
        );
        Some(FlagValue::new(value, changed))
    }
}
