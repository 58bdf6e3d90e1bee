//! Service context bundling all port trait objects.

use std::path::Path;
use std::sync::Arc;

use crate::adapters::live::{LiveFileSystem, LiveShellExecutor};
use crate::adapters::recording::{RecordingFileSystem, RecordingShellExecutor};
use crate::adapters::replaying::{ReplayingFileSystem, ReplayingShellExecutor};
use crate::cassette::config::CassetteConfig;
use crate::cassette::format::Cassette;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::error::PortError;
use crate::ports::filesystem::FileSystem;
use crate::ports::shell::{ShellCommand, ShellExecutor, ShellOutput};

/// Bundles the port trait objects a command needs.
///
/// Constructors wire up different adapter implementations (live, replaying,
/// recording).
pub struct ServiceContext {
    /// Filesystem for manifest I/O.
    pub fs: Box<dyn FileSystem>,
    /// Executor for the compiler and deployment CLI.
    pub shell: Box<dyn ShellExecutor>,
}

impl ServiceContext {
    /// Creates a context from explicit adapters.
    #[must_use]
    pub fn new(fs: Box<dyn FileSystem>, shell: Box<dyn ShellExecutor>) -> Self {
        Self { fs, shell }
    }

    /// Creates a live context backed by the real disk and real processes.
    #[must_use]
    pub fn live() -> Self {
        Self::new(Box::new(LiveFileSystem), Box::new(LiveShellExecutor))
    }

    /// Creates a recording context whose cassettes land under `base`.
    ///
    /// Live adapters do the real work; every interaction is captured by the
    /// returned session. Drop the context before calling
    /// [`RecordingSession::finish`].
    ///
    /// # Errors
    ///
    /// Returns an error if the session directory cannot be created.
    pub fn recording_at(base: &Path) -> Result<(Self, RecordingSession), String> {
        let session = RecordingSession::new(base)?;
        let ctx = Self::new(
            Box::new(RecordingFileSystem::new(Box::new(LiveFileSystem), Arc::clone(&session.fs))),
            Box::new(RecordingShellExecutor::new(
                Box::new(LiveShellExecutor),
                Arc::clone(&session.shell),
            )),
        );
        Ok((ctx, session))
    }

    /// Creates a replaying context from a single cassette file holding
    /// interactions for every port.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        let cassette: Cassette = serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))?;

        // Each port gets its own replayer so that per-port cursors are independent.
        Ok(Self::new(
            Box::new(ReplayingFileSystem::new(CassetteReplayer::new(&cassette))),
            Box::new(ReplayingShellExecutor::new(CassetteReplayer::new(&cassette))),
        ))
    }

    /// Creates a replaying context from per-port cassette files.
    ///
    /// Ports without a configured cassette file panic with a clear message
    /// when called.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn replaying_from(config: &CassetteConfig) -> Result<Self, String> {
        let replayers = config.load_all()?;
        Ok(Self::new(
            match replayers.fs {
                Some(r) => Box::new(ReplayingFileSystem::new(r)),
                None => Box::new(PanickingFileSystem),
            },
            match replayers.shell {
                Some(r) => Box::new(ReplayingShellExecutor::new(r)),
                None => Box::new(PanickingShellExecutor),
            },
        ))
    }
}

// --- Panicking adapters for unspecified ports ---

struct PanickingFileSystem;

impl PanickingFileSystem {
    fn fail() -> ! {
        panic!("FileSystem port not configured in CassetteConfig (no cassette loaded for fs)");
    }
}

impl FileSystem for PanickingFileSystem {
    fn read_to_string(&self, _path: &Path) -> Result<String, PortError> {
        Self::fail()
    }
    fn write(&self, _path: &Path, _contents: &str) -> Result<(), PortError> {
        Self::fail()
    }
    fn create_dir_all(&self, _path: &Path) -> Result<(), PortError> {
        Self::fail()
    }
    fn exists(&self, _path: &Path) -> bool {
        Self::fail()
    }
}

struct PanickingShellExecutor;

impl ShellExecutor for PanickingShellExecutor {
    fn run(&self, _command: &ShellCommand) -> Result<ShellOutput, PortError> {
        panic!("ShellExecutor port not configured in CassetteConfig (no cassette loaded for shell)");
    }
}
