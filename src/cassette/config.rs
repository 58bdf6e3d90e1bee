//! Cassette configuration for composable per-port replay.

use std::path::{Path, PathBuf};

use super::format::Cassette;
use super::replayer::CassetteReplayer;

/// Per-port cassette file paths. Ports without a cassette path will panic
/// if called during replay.
#[derive(Debug, Clone, Default)]
pub struct CassetteConfig {
    /// Path to the filesystem port cassette file.
    pub fs: Option<PathBuf>,
    /// Path to the shell port cassette file.
    pub shell: Option<PathBuf>,
}

/// Per-port replayers, each with its own interaction stream.
pub struct PortReplayers {
    /// Replayer for the filesystem port.
    pub fs: Option<CassetteReplayer>,
    /// Replayer for the shell port.
    pub shell: Option<CassetteReplayer>,
}

impl CassetteConfig {
    /// Returns a config where all port paths are `None`.
    #[must_use]
    pub fn panic_on_unspecified() -> Self {
        Self::default()
    }

    /// Points every port at the files a [`RecordingSession`] writes into `dir`.
    ///
    /// [`RecordingSession`]: super::session::RecordingSession
    #[must_use]
    pub fn from_session_dir(dir: &Path) -> Self {
        Self {
            fs: Some(dir.join("fs.cassette.yaml")),
            shell: Some(dir.join("shell.cassette.yaml")),
        }
    }

    /// Load a cassette file and create a single replayer.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<CassetteReplayer, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        let cassette: Cassette = serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))?;
        Ok(CassetteReplayer::new(&cassette))
    }

    /// Load all configured per-port cassette files and create replayers.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn load_all(&self) -> Result<PortReplayers, String> {
        Ok(PortReplayers {
            fs: self.fs.as_deref().map(Self::load).transpose()?,
            shell: self.shell.as_deref().map(Self::load).transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::Interaction;
    use chrono::Utc;
    use serde_json::json;

    fn write_cassette(path: &Path, interactions: Vec<Interaction>) {
        let cassette =
            Cassette { name: "test".into(), recorded_at: Utc::now(), commit: "abc".into(), interactions };
        std::fs::write(path, serde_yaml::to_string(&cassette).unwrap()).unwrap();
    }

    #[test]
    fn load_all_with_only_shell_configured() {
        let dir = tempfile::tempdir().unwrap();
        let shell_path = dir.path().join("shell.cassette.yaml");
        write_cassette(
            &shell_path,
            vec![Interaction {
                seq: 0,
                port: "shell".into(),
                method: "run".into(),
                input: json!({"program": "npx"}),
                output: json!({"ok": {"exit_code": 2}}),
            }],
        );

        let config = CassetteConfig { shell: Some(shell_path), ..CassetteConfig::default() };
        let mut replayers = config.load_all().unwrap();

        let shell = replayers.shell.as_mut().unwrap();
        assert_eq!(shell.next_interaction("shell", "run").output, json!({"ok": {"exit_code": 2}}));
        assert!(replayers.fs.is_none());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = CassetteConfig::load(Path::new("/nonexistent/fs.cassette.yaml"))
            .err()
            .expect("missing file must fail");
        assert!(err.contains("Failed to read cassette file"));
    }

    #[test]
    fn from_session_dir_points_at_per_port_files() {
        let config = CassetteConfig::from_session_dir(Path::new("rec/2026-01-01T00-00-00"));
        assert_eq!(config.fs.unwrap(), Path::new("rec/2026-01-01T00-00-00/fs.cassette.yaml"));
        assert_eq!(
            config.shell.unwrap(),
            Path::new("rec/2026-01-01T00-00-00/shell.cassette.yaml")
        );
    }

    #[test]
    fn load_all_with_no_cassettes() {
        let replayers = CassetteConfig::panic_on_unspecified().load_all().unwrap();
        assert!(replayers.fs.is_none());
        assert!(replayers.shell.is_none());
    }
}
