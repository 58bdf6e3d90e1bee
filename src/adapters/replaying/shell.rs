//! Replaying adapter for the `ShellExecutor` port.

use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::error::PortError;
use crate::ports::shell::{ShellCommand, ShellExecutor, ShellOutput};

/// Replays recorded exit statuses from a cassette.
pub struct ReplayingShellExecutor {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingShellExecutor {
    /// Creates a new replaying shell executor from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl ShellExecutor for ReplayingShellExecutor {
    fn run(&self, _command: &ShellCommand) -> Result<ShellOutput, PortError> {
        let output = next_output(&self.replayer, "shell", "run");
        replay_result(&output, "shell::run")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use chrono::Utc;
    use serde_json::json;

    fn make_replayer(output: serde_json::Value) -> CassetteReplayer {
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            commit: "abc".into(),
            interactions: vec![Interaction {
                seq: 0,
                port: "shell".into(),
                method: "run".into(),
                input: json!({"program": "npx", "args": ["next", "build"]}),
                output,
            }],
        };
        CassetteReplayer::new(&cassette)
    }

    fn build_cmd() -> ShellCommand {
        ShellCommand::from_argv(&["npx", "next", "build"]).unwrap()
    }

    #[test]
    fn replaying_shell_exit_code() {
        let shell = ReplayingShellExecutor::new(make_replayer(json!({"ok": {"exit_code": 1}})));
        let result = shell.run(&build_cmd()).unwrap();
        assert_eq!(result.exit_code, 1);
        assert!(!result.success());
    }

    #[test]
    fn replaying_shell_spawn_error() {
        let shell =
            ReplayingShellExecutor::new(make_replayer(json!({"err": "No such file or directory"})));
        assert!(shell.run(&build_cmd()).is_err());
    }
}
