//! `amplify-reconcile check` command.

use crate::check::check;
use crate::config::Config;
use crate::context::ServiceContext;

/// Execute the `check` command.
///
/// # Errors
///
/// Returns an error string when any manifest is missing or malformed.
pub fn run(ctx: &ServiceContext, config: &Config) -> Result<(), String> {
    let report = check(ctx.fs.as_ref(), &config.project_root, &config.target_dirs);
    let problems = report.problems();

    if problems.is_empty() {
        println!("All {} manifests present.", report.checks.len());
        return Ok(());
    }

    for problem in &problems {
        println!("{:<8} {}", problem.status.to_string(), problem.path.display());
    }
    Err(format!(
        "{} of {} manifests need repair; run `amplify-reconcile write`",
        problems.len(),
        report.checks.len()
    ))
}
