//! Core library entry for the `amplify-reconcile` CLI.
//!
//! Keeps the Next.js manifests that Amplify hosting expects
//! (`required-server-files.json`, `routes-manifest.json`,
//! `build-manifest.json`) present in every candidate output directory,
//! whether or not the real build produced them.

pub mod adapters;
pub mod build;
pub mod cassette;
pub mod check;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod deploy;
pub mod error;
pub mod fanout;
pub mod manifest;
pub mod ports;

use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::EnvFilter;

pub use error::{ReconcileError, Result};

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> std::result::Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };
    init_logging(cli.verbose);
    commands::dispatch(&cli)
}

/// Installs the stderr log subscriber. `RUST_LOG` takes precedence over `verbose`.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .try_init();
}
