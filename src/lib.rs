//! Core library entry for the `listwise` CLI.
//!
//! Lists and todos live on a hosted REST store. Reads go through a cache
//! that every successful write invalidates; task input is normalized and
//! validated before anything is sent.

pub mod adapters;
pub mod api;
pub mod cache;
pub mod cassette;
pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod context;
pub mod display;
pub mod form;
pub mod model;
pub mod ports;
pub mod selection;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    commands::dispatch(&cli.command)
}
