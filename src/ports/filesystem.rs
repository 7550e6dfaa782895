//! Filesystem port for reading the source tree and writing the generated project.

use std::path::{Path, PathBuf};

use super::PortError;

/// Provides filesystem access for the analyzer, the generator and snapshots.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or is not valid UTF-8.
    fn read_to_string(&self, path: &Path) -> Result<String, PortError>;

    /// Writes the given contents to a file, creating or overwriting it.
    ///
    /// Missing parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (permissions, disk full, etc.).
    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError>;

    /// Creates a directory and all of its parents. Succeeds if it already exists.
    ///
    /// # Errors
    ///
    /// Returns an error if a component cannot be created.
    fn create_dir_all(&self, path: &Path) -> Result<(), PortError>;

    /// Returns `true` if the path exists on the filesystem.
    fn exists(&self, path: &Path) -> bool;

    /// Recursively lists every regular file below `root`, sorted by path.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` is not a readable directory.
    fn walk_files(&self, root: &Path) -> Result<Vec<PathBuf>, PortError>;
}
