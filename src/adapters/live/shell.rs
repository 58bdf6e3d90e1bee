//! Live shell executor using `std::process::Command`.

use std::process::Command;

use tracing::debug;

use crate::error::PortError;
use crate::ports::shell::{ShellCommand, ShellExecutor, ShellOutput};

/// Live executor that spawns the program directly with inherited stdio.
pub struct LiveShellExecutor;

impl ShellExecutor for LiveShellExecutor {
    fn run(&self, command: &ShellCommand) -> Result<ShellOutput, PortError> {
        debug!(command = %command.display(), "spawning");
        let mut process = Command::new(&command.program);
        process.args(&command.args);
        for key in &command.env_remove {
            process.env_remove(key);
        }
        process.envs(command.env.iter().map(|(k, v)| (k, v)));

        let status = process.status()?;
        Ok(ShellOutput { exit_code: status.code().unwrap_or(-1) })
    }
}
