//! `amplify-reconcile write` command.

use crate::config::Config;
use crate::context::ServiceContext;
use crate::fanout::FanoutWriter;

/// Execute the `write` command.
///
/// # Errors
///
/// Returns an error string naming the first directory or file that could not
/// be created.
pub fn run(ctx: &ServiceContext, config: &Config) -> Result<(), String> {
    FanoutWriter::new(ctx.fs.as_ref(), &config.project_root)
        .write_all(&config.target_dirs)
        .map(|_| ())
        .map_err(|e| e.to_string())
}
