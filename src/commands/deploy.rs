//! `amplify-reconcile deploy` command.

use crate::config::Config;
use crate::context::ServiceContext;
use crate::deploy::{deploy, DeployMode};

/// Execute the `deploy` command.
///
/// # Errors
///
/// Returns an error string if the deployment CLI is misconfigured, cannot
/// start, or exits non-zero.
pub fn run(ctx: &ServiceContext, config: &Config, outputs_only: bool) -> Result<(), String> {
    let mode = if outputs_only { DeployMode::OutputsOnly } else { DeployMode::Pipeline };
    deploy(ctx, config, mode).map_err(|e| e.to_string())
}
