//! Subcommand handlers for the binary

pub mod config;
pub mod keys;
pub mod time;
