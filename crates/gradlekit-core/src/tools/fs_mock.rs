//! Mock file system adapter for testing.
//!
//! Uses an in-memory map to simulate file system operations, so resolver
//! and compilation tests can assert on fabrication side effects without
//! touching the disk.

use crate::error::{HarnessError, Result};
use crate::tools::fs::FsAdapter;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Mock file system adapter for testing.
///
/// All operations are thread-safe via `Arc<Mutex>`, and the adapter
/// tracks every write so tests can count fabrications.
///
/// # Examples
///
/// ```
/// use gradlekit_core::tools::fs_mock::MockFsAdapter;
/// use gradlekit_core::tools::fs::FsAdapter;
/// use std::path::Path;
///
/// let fs = MockFsAdapter::new();
/// fs.write(Path::new("/proj/settings.gradle"), "").unwrap();
/// assert!(fs.is_file(Path::new("/proj/settings.gradle")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockFsAdapter {
    /// In-memory file storage (path -> content)
    files: Arc<Mutex<HashMap<PathBuf, String>>>,
    /// In-memory directory storage
    dirs: Arc<Mutex<Vec<PathBuf>>>,
    /// Paths written, in order, including overwrites
    writes: Arc<Mutex<Vec<PathBuf>>>,
}

impl MockFsAdapter {
    /// Creates a new empty mock file system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every path written so far, in write order.
    pub fn written_paths(&self) -> Vec<PathBuf> {
        self.writes.lock().unwrap().clone()
    }

    /// Returns the number of writes to the given path.
    pub fn write_count(&self, path: &Path) -> usize {
        self.writes
            .lock()
            .unwrap()
            .iter()
            .filter(|written| written.as_path() == path)
            .count()
    }

    /// Clears all files, directories and the write history.
    pub fn clear(&self) {
        self.files.lock().unwrap().clear();
        self.dirs.lock().unwrap().clear();
        self.writes.lock().unwrap().clear();
    }
}

impl FsAdapter for MockFsAdapter {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| HarnessError::PathNotFound(path.to_path_buf()))
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            self.create_dir_all(parent)?;
        }

        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_string());
        self.writes.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<String>> {
        let files = self.files.lock().unwrap();
        let dirs = self.dirs.lock().unwrap();

        if !dirs.contains(&path.to_path_buf()) {
            return Err(HarnessError::PathNotFound(path.to_path_buf()));
        }

        let mut entries = Vec::new();

        for file_path in files.keys() {
            if let Some(parent) = file_path.parent()
                && parent == path
                && let Some(name) = file_path.file_name()
            {
                entries.push(name.to_string_lossy().to_string());
            }
        }

        for dir_path in dirs.iter() {
            if let Some(parent) = dir_path.parent()
                && parent == path
                && dir_path != path
                && let Some(name) = dir_path.file_name()
            {
                let name_str = name.to_string_lossy().to_string();
                if !entries.contains(&name_str) {
                    entries.push(name_str);
                }
            }
        }

        Ok(entries)
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
            || self.dirs.lock().unwrap().contains(&path.to_path_buf())
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        let mut dirs = self.dirs.lock().unwrap();

        let mut current = Some(path.to_path_buf());
        while let Some(dir) = current {
            if dir.as_os_str().is_empty() {
                break;
            }
            if !dirs.contains(&dir) {
                dirs.push(dir.clone());
            }
            current = dir.parent().map(Path::to_path_buf);
        }

        Ok(())
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.lock().unwrap().contains(&path.to_path_buf())
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }
}
