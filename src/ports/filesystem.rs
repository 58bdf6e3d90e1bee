//! Filesystem port for manifest I/O.

use std::path::Path;

use crate::error::PortError;

/// Provides filesystem access for reading and writing manifest files.
///
/// Abstracting the filesystem allows deterministic replay and testing
/// without touching the real disk.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or is not valid UTF-8.
    fn read_to_string(&self, path: &Path) -> Result<String, PortError>;

    /// Writes the given contents to a file, creating or overwriting it.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (permissions, disk full, etc.).
    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError>;

    /// Creates a directory and any missing parents.
    ///
    /// # Errors
    ///
    /// Returns an error if any component cannot be created, including when a
    /// non-directory already occupies the path.
    fn create_dir_all(&self, path: &Path) -> Result<(), PortError>;

    /// Returns `true` if the path exists on the filesystem.
    fn exists(&self, path: &Path) -> bool;
}
