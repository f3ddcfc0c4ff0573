//! tubekeys binary entry point

mod commands;

use std::io;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use tubekeys::cli::{Cli, Commands, ConfigCommands};
use tubekeys::player::{run_demo, DemoOptions};
use tubekeys::Config;

/// Log to stderr; `RUST_LOG` overrides the default filter.
fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tubekeys=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Keys => commands::keys::handle(),
        Commands::Time { spec } => commands::time::handle(&spec),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::handle_show(),
            ConfigCommands::Path => commands::config::handle_path(),
            ConfigCommands::Edit => commands::config::handle_edit(),
        },
        Commands::Demo(args) => {
            let config = Config::load()?;
            run_demo(
                &config,
                DemoOptions {
                    duration: args.duration,
                    fps: args.fps,
                },
            )
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "tubekeys", &mut io::stdout());
            Ok(())
        }
    }
}
