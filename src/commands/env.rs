//! `amplify-reconcile env` command.

use crate::config::Config;

/// Execute the `env` command.
///
/// # Errors
///
/// Never fails; the signature matches the other handlers.
#[allow(clippy::unnecessary_wraps)]
pub fn run(config: &Config) -> Result<(), String> {
    for line in describe(config) {
        println!("{line}");
    }
    Ok(())
}

/// Renders the resolved configuration as `key: value` lines.
#[must_use]
pub fn describe(config: &Config) -> Vec<String> {
    let dirs: Vec<String> = config.target_dirs.iter().map(|d| d.display().to_string()).collect();
    vec![
        format!("root: {}", config.project_root.display()),
        format!("environment: {}", config.environment),
        format!("target dirs: {}", dirs.join(", ")),
        format!("build command: {}", config.build_command.join(" ")),
        format!("skip lint: {}", config.skip_lint),
        format!("node options: {}", config.node_options_value()),
        format!("credentials: {}", config.credentials.source),
        format!("stripped vars: {}", config.credentials.strip.join(", ")),
        format!("app id: {}", config.app_id.as_deref().unwrap_or("-")),
        format!("branch: {}", config.branch.as_deref().unwrap_or("-")),
    ]
}
