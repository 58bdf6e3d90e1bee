//! Shell executor port for running external commands.

use serde::{Deserialize, Serialize};

use crate::error::PortError;

/// A command line plus the environment adjustments for its child process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellCommand {
    /// Program to execute, resolved through `PATH`.
    pub program: String,
    /// Arguments passed to the program.
    pub args: Vec<String>,
    /// Variables set in the child environment.
    pub env: Vec<(String, String)>,
    /// Variables removed from the child environment.
    pub env_remove: Vec<String>,
}

impl ShellCommand {
    /// Builds a command from an argv-style list. The first element is the program.
    ///
    /// Returns `None` when `argv` is empty.
    #[must_use]
    pub fn from_argv<S: AsRef<str>>(argv: &[S]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self {
            program: program.as_ref().to_string(),
            args: args.iter().map(|a| a.as_ref().to_string()).collect(),
            ..Self::default()
        })
    }

    /// Appends an argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Sets a variable in the child environment.
    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Removes variables from the child environment.
    #[must_use]
    pub fn env_remove<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.env_remove.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Renders the command line for log messages.
    #[must_use]
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// The outcome of a command execution.
///
/// Output streams are inherited by the child and passed through, so only the
/// exit status is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellOutput {
    /// The exit code of the process, `-1` when terminated by a signal.
    pub exit_code: i32,
}

impl ShellOutput {
    /// Returns `true` if the process exited with status zero.
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Executes external commands.
///
/// Abstracting execution allows deterministic replay by recording
/// and replaying exit statuses during cassette playback.
pub trait ShellExecutor: Send + Sync {
    /// Runs the command to completion and returns its exit status.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be spawned.
    fn run(&self, command: &ShellCommand) -> Result<ShellOutput, PortError>;
}
