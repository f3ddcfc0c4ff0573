//! Build tasks for tubekeys
//!
//! `cargo run -p xtask -- man [--out-dir DIR]` renders the man pages for the
//! CLI and each subcommand.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_mangen::Man;

use tubekeys::cli::Cli;

#[derive(Debug, Parser)]
#[command(name = "xtask")]
struct Tasks {
    #[command(subcommand)]
    task: Task,
}

#[derive(Debug, Subcommand)]
enum Task {
    /// Generate man pages
    Man {
        /// Output directory
        #[arg(long, default_value = "target/man")]
        out_dir: PathBuf,
    },
}

fn render(cmd: &clap::Command, name: &str, out_dir: &Path) -> Result<()> {
    let mut buffer = Vec::new();
    Man::new(cmd.clone()).render(&mut buffer)?;
    let path = out_dir.join(format!("{}.1", name));
    fs::write(&path, buffer).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn generate_man(out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let cmd = Cli::command();
    render(&cmd, "tubekeys", out_dir)?;
    for sub in cmd.get_subcommands() {
        let name = format!("tubekeys-{}", sub.get_name());
        render(sub, &name, out_dir)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    match Tasks::parse().task {
        Task::Man { out_dir } => generate_man(&out_dir),
    }
}
