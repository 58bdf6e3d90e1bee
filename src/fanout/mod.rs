//! Writes the full manifest set into every candidate output directory.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{ReconcileError, Result};
use crate::manifest::{render, ManifestKind};
use crate::ports::FileSystem;

/// Directories the hosting platform may look in, relative to the project root.
pub const DEFAULT_TARGET_DIRS: [&str; 8] =
    [".next", ".next/server", "out", "out/.next", "out/.next/server", ".", "server", ".amplify-hosting"];

/// Files written by a successful fan-out, in write order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FanoutReport {
    /// Every manifest path written.
    pub written: Vec<PathBuf>,
    /// Directories that did not exist before the run.
    pub created_dirs: Vec<PathBuf>,
}

/// Writes every [`ManifestKind`] into each target directory.
pub struct FanoutWriter<'a> {
    fs: &'a dyn FileSystem,
    root: &'a Path,
}

impl<'a> FanoutWriter<'a> {
    /// Creates a writer resolving directories against `root`.
    #[must_use]
    pub fn new(fs: &'a dyn FileSystem, root: &'a Path) -> Self {
        Self { fs, root }
    }

    /// Creates each directory in order, then overwrites its three manifests.
    ///
    /// Stops at the first failure; files written before it are left in place.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::CreateDir`] or [`ReconcileError::Write`] for
    /// the first path that could not be created or written, and
    /// [`ReconcileError::Render`] before touching disk if a manifest cannot
    /// be serialized.
    pub fn write_all<P: AsRef<Path>>(&self, dirs: &[P]) -> Result<FanoutReport> {
        let rendered = ManifestKind::ALL
            .into_iter()
            .map(|kind| render(kind).map(|text| (kind, text)))
            .collect::<Result<Vec<(ManifestKind, String)>>>()?;

        let mut report = FanoutReport::default();
        for dir in dirs {
            let dir = self.root.join(dir);
            if !self.fs.exists(&dir) {
                report.created_dirs.push(dir.clone());
            }
            self.fs
                .create_dir_all(&dir)
                .map_err(|source| ReconcileError::CreateDir { path: dir.clone(), source })?;

            for (kind, contents) in &rendered {
                let path = dir.join(kind.file_name());
                self.fs
                    .write(&path, contents)
                    .map_err(|source| ReconcileError::Write { path: path.clone(), source })?;
                debug!(path = %path.display(), "wrote manifest");
                report.written.push(path);
            }
        }

        info!(
            files = report.written.len(),
            dirs = dirs.len(),
            created = report.created_dirs.len(),
            "manifests written"
        );
        Ok(report)
    }
}
