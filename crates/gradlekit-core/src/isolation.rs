//! Maven-local isolation for shared executers.
//!
//! Plugin builds publish into the ambient Maven local repository, shared
//! global state that one test can silently pollute for every other test.
//! [`MavenLocalGuard`] is the sanctioned way to share an executer: a
//! before-hook repoints the repository at a fresh directory scoped to the
//! test, and an after-hook asserts nothing leaked into it.

use crate::error::{HarnessError, Result};
use crate::executer::GradleExecuter;
use crate::tools::fs::FsAdapter;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Directory the isolated repository is created under; a build writing
/// here is a leakage defect by definition.
pub const ISOLATED_REPOSITORY_DIR_NAME: &str = "m2-home-should-not-be-filled";

const MAVEN_HOME_DIR_NAME: &str = "maven_home";
const USER_M2_DIR_NAME: &str = ".m2";
const GLOBAL_MAVEN_DIR_NAME: &str = "m2_home";

#[derive(Debug, Default)]
struct GuardState {
    initialized: bool,
    isolation_enabled: bool,
    isolated_repository: Option<PathBuf>,
}

/// Scoped Maven installation isolating the local repository per run.
///
/// The guard receives its resources explicitly (the test directory the
/// scoped installation lives under and the file system adapter) and
/// never discovers the ambient Maven home through the environment.
///
/// Calling [`apply`](MavenLocalGuard::apply) opts the executer into the
/// guard's real Maven home and permanently disables isolation for this
/// guard: explicit opt-in to a real external environment supersedes the
/// automatic isolation.
pub struct MavenLocalGuard {
    test_directory: PathBuf,
    fs: Arc<dyn FsAdapter>,
    state: Arc<Mutex<GuardState>>,
}

impl MavenLocalGuard {
    /// Creates a guard scoped to the given test directory.
    ///
    /// # Arguments
    ///
    /// * `test_directory` - Directory the scoped installation lives under.
    /// * `fs` - File system adapter for layout creation and leak checks.
    pub fn new(test_directory: impl Into<PathBuf>, fs: Arc<dyn FsAdapter>) -> Self {
        Self {
            test_directory: test_directory.into(),
            fs,
            state: Arc::new(Mutex::new(GuardState {
                initialized: false,
                isolation_enabled: true,
                isolated_repository: None,
            })),
        }
    }

    /// User home directory of the scoped installation.
    pub fn user_home_directory(&self) -> PathBuf {
        self.test_directory.join(MAVEN_HOME_DIR_NAME)
    }

    /// `.m2` directory of the scoped installation.
    pub fn user_m2_directory(&self) -> PathBuf {
        self.user_home_directory().join(USER_M2_DIR_NAME)
    }

    /// `settings.xml` of the scoped installation.
    pub fn user_settings_file(&self) -> PathBuf {
        self.user_m2_directory().join("settings.xml")
    }

    /// Global Maven directory of the scoped installation.
    pub fn global_maven_directory(&self) -> PathBuf {
        self.user_home_directory().join(GLOBAL_MAVEN_DIR_NAME)
    }

    /// Local repository of the scoped installation.
    pub fn local_repository(&self) -> PathBuf {
        self.user_m2_directory().join("repository")
    }

    /// Returns `true` while automatic isolation is still enabled.
    pub fn isolation_enabled(&self) -> bool {
        self.state.lock().unwrap().isolation_enabled
    }

    /// Writes a `settings.xml` pointing the scoped installation at the
    /// given local repository.
    ///
    /// # Errors
    ///
    /// Returns a file system error when the settings file cannot be
    /// written.
    pub fn generate_user_settings_file(&self, repository: &Path) -> Result<()> {
        self.init()?;
        let content = format!(
            "<settings>\n    <localRepository>{}</localRepository>\n</settings>",
            repository.display()
        );
        self.fs.write(&self.user_settings_file(), &content)
    }

    /// Opts the executer into the guard's real Maven home.
    ///
    /// Sets the user home directory, exports `M2_HOME` when the global
    /// Maven directory exists, and permanently disables isolation for
    /// this guard (one-way transition).
    ///
    /// # Errors
    ///
    /// Returns a file system error when the scoped installation cannot
    /// be laid out.
    pub fn apply<E: GradleExecuter>(&self, executer: &mut E) -> Result<()> {
        self.init()?;
        self.state.lock().unwrap().isolation_enabled = false;

        executer.with_user_home_directory(self.user_home_directory());
        let global_maven_directory = self.global_maven_directory();
        if self.fs.exists(&global_maven_directory) {
            executer.with_environment_vars([(
                "M2_HOME".to_string(),
                global_maven_directory.display().to_string(),
            )]);
        }
        Ok(())
    }

    /// Registers the isolation hooks on the executer.
    ///
    /// The before-hook creates a fresh isolated repository under the test
    /// directory and rewrites the invocation with
    /// `-Dmaven.repo.local=<dir>`. The after-hook asserts the directory
    /// is still empty and raises [`HarnessError::RepositoryLeakage`]
    /// otherwise, failing the run even when the build itself passed.
    /// Both hooks are inert once [`apply`](MavenLocalGuard::apply)
    /// disabled isolation.
    pub fn isolate<E: GradleExecuter>(&self, executer: &mut E) {
        let fs = Arc::clone(&self.fs);
        let state = Arc::clone(&self.state);
        let repository = self.test_directory.join(ISOLATED_REPOSITORY_DIR_NAME);
        executer.before_execute(move |invocation| {
            let mut guard = state.lock().unwrap();
            if !guard.isolation_enabled {
                return Ok(());
            }
            fs.create_dir_all(&repository)?;
            *invocation = invocation
                .clone()
                .with_argument(format!("-Dmaven.repo.local={}", repository.display()));
            guard.isolated_repository = Some(repository.clone());
            Ok(())
        });

        let fs = Arc::clone(&self.fs);
        let state = Arc::clone(&self.state);
        executer.after_execute(move |_invocation| {
            let guard = state.lock().unwrap();
            if !guard.isolation_enabled {
                return Ok(());
            }
            if let Some(repository) = &guard.isolated_repository {
                let entries = fs.list_dir(repository)?;
                if !entries.is_empty() {
                    tracing::error!(
                        repository = %repository.display(),
                        entries = entries.len(),
                        "isolated maven repository was polluted"
                    );
                    return Err(HarnessError::RepositoryLeakage(repository.clone()));
                }
            }
            Ok(())
        });
    }

    fn init(&self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.initialized {
            return Ok(());
        }
        self.fs.create_dir_all(&self.user_m2_directory())?;
        self.fs.create_dir_all(&self.global_maven_directory())?;
        tracing::debug!(home = %self.user_home_directory().display(), "maven home laid out");
        state.initialized = true;
        Ok(())
    }
}
