// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered command-line configuration example.
//!
//! This example demonstrates:
//! - Binding nested subcommand flags to configuration keys
//! - Reading the same keys from environment variables and a YAML file
//! - Forcing a configuration file with a global `--config` flag
//!
//! To run this example:
//! ```bash
//! # Values from the command line
//! cargo run --example layered_cli -- server --port 9000 admin --token s3cret
//!
//! # Values from the environment
//! ACME_SERVER_PORT=7000 cargo run --example layered_cli -- server
//!
//! # Values from an explicit file
//! echo "server:
//!   host: example.com
//!   port: 6000" > /tmp/acme.yaml
//! cargo run --example layered_cli -- --config /tmp/acme.yaml server
//! ```

use clap::{Arg, ArgAction, Command};
use hexbind::prelude::*;

fn cli() -> Command {
    Command::new("acme")
        .about("Layered configuration demo")
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .help("Read this configuration file instead of searching for one"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("server")
                .about("Run the server")
                .arg(Arg::new("host").long("host").default_value("127.0.0.1"))
                .arg(Arg::new("port").long("port").default_value("8080"))
                .subcommand(
                    Command::new("admin")
                        .about("Administrative endpoint")
                        .arg(Arg::new("token").long("token")),
                ),
        )
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let mut cli = cli();
    cli.build();

    let bindings = [
        Binding::new("server.host", "server.host"),
        Binding::new("server.port", "server.port"),
        Binding::new("admin.token", "server.admin.token"),
        Binding::new("verbose", "verbose"),
    ];

    let mut config = Configuration::with_defaults("acme", &cli, &bindings)?;

    let matches = cli.get_matches();
    let level = if matches.get_flag("verbose") {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    if let Some(path) = matches.get_one::<String>("config") {
        config.set_forced_file(path);
    }
    config.backend_mut().set_flag_values(matches);
    config.read_configuration()?;

    let settings = config.backend();
    println!("=== Resolved configuration ===");
    for key in settings.all_keys() {
        let value = settings.get(&key)?;
        println!("{} = {}", key, value.as_str());
    }

    let port = settings.get_str("server.port")?.as_u64("server.port")?;
    let token = settings.get_or_default(&ConfigKey::from("admin.token"), "<unset>");
    println!("\nserver would listen on port {} (admin token: {})", port, token.as_str());

    Ok(())
}
