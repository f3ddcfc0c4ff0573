//! CLI definition
//!
//! Kept in the library so the xtask crate can render the man page from the
//! same definition.

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Version plus build date and commit hash.
#[cfg(not(feature = "release"))]
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("TUBEKEYS_BUILD_DATE"),
    " ",
    env!("VERGEN_GIT_SHA"),
    ")"
);

/// Version plus build date.
#[cfg(feature = "release")]
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("TUBEKEYS_BUILD_DATE"),
    ")"
);

/// Keyboard and hover playback controls for a video front end.
#[derive(Debug, Parser)]
#[command(name = "tubekeys", version, long_version = LONG_VERSION, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the effective key bindings
    Keys,

    /// Parse a timestamp such as 1h03m12s and print it in seconds
    Time {
        /// Timestamp: plain seconds or h/m/s components
        spec: String,
    },

    /// Show or edit the configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Run the interactive terminal demo
    Demo(DemoArgs),

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the current configuration as TOML
    Show,
    /// Print the config file location
    Path,
    /// Open the config file in $EDITOR
    Edit,
}

#[derive(Debug, Args)]
pub struct DemoArgs {
    /// Length of the synthetic video in seconds
    #[arg(long, default_value_t = 600.0)]
    pub duration: f64,

    /// Frame rate of the synthetic video
    #[arg(long, default_value_t = 30.0)]
    pub fps: f64,
}
