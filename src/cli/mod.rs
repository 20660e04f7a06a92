//! CLI module for officina - command-line interface and subcommands.
//!
//! `commands` holds the clap definitions, `handlers` runs them against the
//! snapshot store.

pub mod commands;
pub mod handlers;

pub use commands::Cli;
