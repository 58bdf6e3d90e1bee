//! Backend deployment through the Amplify Gen 2 CLI.
//!
//! Unlike the build wrapper, a failure here is returned to the caller.

use tracing::{info, warn};

use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::{ReconcileError, Result};
use crate::ports::ShellCommand;

/// Which `ampx` operation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployMode {
    /// Deploy the backend stack for the branch.
    Pipeline,
    /// Only fetch `amplify_outputs.json` for an existing stack.
    OutputsOnly,
}

/// Builds the `ampx` invocation for `mode`.
///
/// # Errors
///
/// Returns [`ReconcileError::Config`] when the branch or app id is unknown.
pub fn deploy_command(config: &Config, mode: DeployMode) -> Result<ShellCommand> {
    let branch = config.branch.as_deref().ok_or_else(|| {
        ReconcileError::Config("AWS_BRANCH is required for backend deployment".to_string())
    })?;
    let app_id = config.app_id.as_deref().ok_or_else(|| {
        ReconcileError::Config("AWS_APP_ID is required for backend deployment".to_string())
    })?;

    let argv: &[&str] = match mode {
        DeployMode::Pipeline => &["npx", "ampx", "pipeline-deploy"],
        DeployMode::OutputsOnly => &["npx", "ampx", "generate", "outputs"],
    };
    let command = config
        .child_command(argv)
        .ok_or_else(|| ReconcileError::Config("empty deploy command".to_string()))?
        .arg("--branch")
        .arg(branch)
        .arg("--app-id")
        .arg(app_id);
    Ok(command)
}

/// Runs the backend deployment and fails on a non-zero exit.
///
/// # Errors
///
/// Returns [`ReconcileError::Config`] for missing identifiers,
/// [`ReconcileError::Spawn`] if the CLI cannot be started, and
/// [`ReconcileError::CommandFailed`] if it exits non-zero.
pub fn deploy(ctx: &ServiceContext, config: &Config, mode: DeployMode) -> Result<()> {
    let command = deploy_command(config, mode)?;
    if !config.environment.is_ci() && mode == DeployMode::Pipeline {
        warn!("pipeline-deploy is intended for CI; running from a local environment");
    }
    info!(command = %command.display(), "deploying backend");

    let output = ctx
        .shell
        .run(&command)
        .map_err(|source| ReconcileError::Spawn { command: command.display(), source })?;
    if !output.success() {
        return Err(ReconcileError::CommandFailed {
            command: command.display(),
            exit_code: output.exit_code,
        });
    }
    info!("backend deployed");
    Ok(())
}
