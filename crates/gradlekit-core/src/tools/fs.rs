//! File system adapter trait.
//!
//! The settings-file resolver, the fabrication side effect and the
//! isolation guard all touch the file system through this seam, so tests
//! can run against an in-memory implementation.

use crate::error::Result;
use std::path::Path;

/// File system operations the harness depends on.
///
/// Implementations can be real (using `std::fs`) or mocked for testing.
pub trait FsAdapter: Send + Sync {
    /// Reads the contents of a file as a string.
    ///
    /// # Errors
    ///
    /// Returns `HarnessError::PathNotFound` if the file doesn't exist,
    /// `HarnessError::FileReadError` if reading fails, or
    /// `HarnessError::Io` for other IO errors.
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Writes a string to a file, creating it and missing parents.
    ///
    /// # Errors
    ///
    /// Returns `HarnessError::FileWriteError` if writing fails,
    /// `HarnessError::PermissionDenied` if lacking write permissions,
    /// or `HarnessError::Io` for other IO errors.
    fn write(&self, path: &Path, content: &str) -> Result<()>;

    /// Lists all entry names (not full paths) in a directory.
    ///
    /// # Errors
    ///
    /// Returns `HarnessError::PathNotFound` if the directory doesn't
    /// exist, or `HarnessError::InvalidPath` if the path is not a
    /// directory.
    fn list_dir(&self, path: &Path) -> Result<Vec<String>>;

    /// Checks if a path exists (file or directory).
    fn exists(&self, path: &Path) -> bool;

    /// Creates a directory and all missing parent directories.
    ///
    /// # Errors
    ///
    /// Returns `HarnessError::FileWriteError` if creation fails, or
    /// `HarnessError::PermissionDenied` if lacking write permissions.
    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Checks if a path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Checks if a path exists and is a file.
    fn is_file(&self, path: &Path) -> bool;
}
