//! Command dispatch and handlers.

pub mod build;
pub mod check;
pub mod deploy;
pub mod env;
pub mod print;
pub mod write;

use tracing::{info, warn};

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::context::ServiceContext;

/// Dispatch a parsed command to its handler.
///
/// When `RECONCILE_RECORD` is set to a directory path, all port interactions
/// are recorded to per-port cassette files under that directory.
///
/// `build` never stops on configuration or recording problems: unusable
/// settings fall back to their defaults and a recording that cannot start
/// or finish is dropped, each with a warning, so the manifests are always
/// written.
///
/// # Errors
///
/// Returns an error string if configuration is invalid or the selected
/// command handler fails.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    let command = cli.command.clone().unwrap_or(Command::Build);

    // Printing a default manifest needs neither configuration nor ports.
    if let Command::Print { kind } = &command {
        return print::run(*kind);
    }

    let tolerant = matches!(command, Command::Build);
    let mut config = if tolerant {
        let (config, problems) = Config::from_process_env_lenient(cli.root.as_deref());
        for problem in &problems {
            warn!(error = %problem, "ignoring unusable setting; continuing with defaults");
        }
        config
    } else {
        Config::from_process_env(cli.root.as_deref()).map_err(|e| e.to_string())?
    };
    if !cli.dirs.is_empty() {
        config.target_dirs.clone_from(&cli.dirs);
    }

    let (ctx, session) = match &config.record_dir {
        Some(dir) => match ServiceContext::recording_at(dir) {
            Ok((ctx, session)) => (ctx, Some(session)),
            Err(e) if tolerant => {
                warn!(error = %e, "recording unavailable; running without it");
                (ServiceContext::live(), None)
            }
            Err(e) => return Err(e),
        },
        None => (ServiceContext::live(), None),
    };

    let result = dispatch_with_context(&command, &ctx, &config);

    // Finish recording after command completes (even on error)
    if let Some(session) = session {
        // Drop context first to release Arc references
        drop(ctx);
        match session.finish() {
            Ok(dir) => info!(dir = %dir.display(), "recording saved"),
            Err(e) if tolerant => warn!(error = %e, "recording could not be saved"),
            Err(e) => return Err(e),
        }
    }

    result
}

/// Dispatch a command with the given service context and configuration.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch_with_context(
    command: &Command,
    ctx: &ServiceContext,
    config: &Config,
) -> Result<(), String> {
    match command {
        Command::Build => build::run(ctx, config),
        Command::Write => write::run(ctx, config),
        Command::Check => check::run(ctx, config),
        Command::Deploy { outputs_only } => deploy::run(ctx, config, *outputs_only),
        Command::Print { kind } => print::run(*kind),
        Command::Env => env::run(config),
    }
}
