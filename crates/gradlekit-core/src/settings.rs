//! Settings-file resolution for an invocation.
//!
//! Gradle refuses to treat a directory as a build without a settings file
//! at or above it. The resolver walks upward from the working directory,
//! bounded by the test directory, and fabricates an empty settings file
//! at the working directory when the walk comes up empty.

use crate::error::Result;
use crate::tools::fs::FsAdapter;
use std::path::{Path, PathBuf};

/// Plain settings file name Gradle recognizes.
pub const SETTINGS_FILE_NAME: &str = "settings.gradle";

/// Kotlin-script settings file name Gradle recognizes.
pub const SETTINGS_SCRIPT_FILE_NAME: &str = "settings.gradle.kts";

/// Outcome of one settings-file resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsResolution {
    /// `true` when an existing settings file was found during the walk.
    pub found: bool,

    /// Location of the found file, or of the fabricated one.
    pub location: PathBuf,
}

/// Finds or fabricates the settings file for a working directory.
///
/// Walks upward from `working_directory` through its parents, checking
/// each directory for [`SETTINGS_FILE_NAME`] or
/// [`SETTINGS_SCRIPT_FILE_NAME`]; the first match wins. The walk only
/// continues while the current directory is `root` itself or one of its
/// descendants. When the walk exits the boundary without a match, an
/// empty plain settings file is fabricated directly inside
/// `working_directory`, never at a visited ancestor, which makes
/// re-resolution find it.
///
/// # Arguments
///
/// * `working_directory` - Directory the invocation runs in.
/// * `root` - Bounding directory for the upward walk, inclusive.
/// * `fs` - File system adapter used for probing and fabrication.
///
/// # Errors
///
/// Returns a file system error when fabricating the settings file fails.
pub fn resolve_settings_file(
    working_directory: &Path,
    root: &Path,
    fs: &dyn FsAdapter,
) -> Result<SettingsResolution> {
    let mut directory = Some(working_directory);
    while let Some(current) = directory {
        if !is_self_or_descendant(root, current) {
            break;
        }
        if let Some(location) = settings_file_in(current, fs) {
            return Ok(SettingsResolution {
                found: true,
                location,
            });
        }
        directory = current.parent();
    }

    let location = working_directory.join(SETTINGS_FILE_NAME);
    tracing::debug!(location = %location.display(), "fabricating empty settings file");
    fs.write(&location, "")?;
    Ok(SettingsResolution {
        found: false,
        location,
    })
}

/// Checks whether `candidate` is `root` itself or one of its descendants.
///
/// Pure path-prefix containment; both paths are compared as given,
/// without touching the file system.
pub fn is_self_or_descendant(root: &Path, candidate: &Path) -> bool {
    candidate.starts_with(root)
}

fn settings_file_in(directory: &Path, fs: &dyn FsAdapter) -> Option<PathBuf> {
    if !fs.is_dir(directory) {
        return None;
    }
    for name in [SETTINGS_FILE_NAME, SETTINGS_SCRIPT_FILE_NAME] {
        let candidate = directory.join(name);
        if fs.is_file(&candidate) {
            return Some(candidate);
        }
    }
    None
}
