//! Recording adapter for the `ShellExecutor` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::error::PortError;
use crate::ports::{ShellCommand, ShellExecutor, ShellOutput};

/// Records shell interactions while delegating to an inner implementation.
pub struct RecordingShellExecutor {
    inner: Box<dyn ShellExecutor>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingShellExecutor {
    /// Creates a new recording shell executor wrapping the given implementation.
    pub fn new(inner: Box<dyn ShellExecutor>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl ShellExecutor for RecordingShellExecutor {
    fn run(&self, command: &ShellCommand) -> Result<ShellOutput, PortError> {
        let result = self.inner.run(command);
        record_result(&self.recorder, "shell", "run", command, &result);
        result
    }
}
