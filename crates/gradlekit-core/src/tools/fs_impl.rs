//! Standard file system adapter implementation.

use crate::error::{HarnessError, Result};
use crate::tools::fs::FsAdapter;
use std::path::Path;

/// Standard file system adapter using `std::fs`.
///
/// Default implementation used against a real test directory. For tests
/// that should not touch the disk, use the mock implementation instead.
#[derive(Debug, Default)]
pub struct StdFsAdapter;

impl StdFsAdapter {
    /// Creates a new standard file system adapter.
    pub fn new() -> Self {
        Self
    }
}

impl FsAdapter for StdFsAdapter {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                HarnessError::PathNotFound(path.to_path_buf())
            } else {
                HarnessError::FileReadError(format!("{}: {}", path.display(), e))
            }
        })
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.exists()
        {
            self.create_dir_all(parent)?;
        }

        std::fs::write(path, content).map_err(|e| {
            if e.kind() == std::io::ErrorKind::PermissionDenied {
                HarnessError::PermissionDenied(path.display().to_string())
            } else {
                HarnessError::FileWriteError(format!("{}: {}", path.display(), e))
            }
        })
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<String>> {
        if !path.exists() {
            return Err(HarnessError::PathNotFound(path.to_path_buf()));
        }

        if !path.is_dir() {
            return Err(HarnessError::InvalidPath(path.to_path_buf()));
        }

        std::fs::read_dir(path)
            .map_err(|e| HarnessError::FileReadError(format!("{}: {}", path.display(), e)))?
            .map(|entry| {
                entry
                    .map(|e| e.file_name().to_string_lossy().to_string())
                    .map_err(|e| {
                        HarnessError::FileReadError(format!("failed to read directory entry: {}", e))
                    })
            })
            .collect()
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        std::fs::create_dir_all(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::PermissionDenied {
                HarnessError::PermissionDenied(path.display().to_string())
            } else {
                HarnessError::FileWriteError(format!("{}: {}", path.display(), e))
            }
        })
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}
