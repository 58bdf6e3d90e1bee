//! Error type shared by the reconciler, the build wrapper and the deploy step.

use std::path::PathBuf;

use thiserror::Error;

use crate::manifest::ManifestKind;

/// Boxed error returned by the port traits.
pub type PortError = Box<dyn std::error::Error + Send + Sync>;

/// Errors surfaced by reconciliation operations.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// A target directory could not be created.
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying port error.
        source: PortError,
    },

    /// A manifest record could not be turned into JSON.
    #[error("failed to render {kind}: {source}")]
    Render {
        /// Manifest being rendered.
        kind: ManifestKind,
        /// Serializer error.
        source: serde_json::Error,
    },

    /// A manifest file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// File that could not be written.
        path: PathBuf,
        /// Underlying port error.
        source: PortError,
    },

    /// The resolved configuration is unusable.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// An external command could not be started.
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        /// Rendered command line.
        command: String,
        /// Underlying port error.
        source: PortError,
    },

    /// An external command ran but exited non-zero.
    #[error("`{command}` exited with status {exit_code}")]
    CommandFailed {
        /// Rendered command line.
        command: String,
        /// Exit status reported by the process.
        exit_code: i32,
    },
}

/// Convenience alias for results carrying a [`ReconcileError`].
pub type Result<T> = std::result::Result<T, ReconcileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_error_names_the_manifest() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ReconcileError::Render { kind: ManifestKind::BuildManifest, source };
        assert!(err.to_string().starts_with("failed to render build-manifest:"), "{err}");
    }
}
