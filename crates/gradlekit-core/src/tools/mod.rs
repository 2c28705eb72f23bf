//! Tool adapters backing the harness.
//!
//! Each adapter trait defines the seam to one external collaborator: the
//! file system, the build-tool process, and the embedded runner. Every
//! seam ships a standard implementation (where one makes sense) and a
//! mock for testing.

pub mod fs;
pub mod fs_impl;
pub mod fs_mock;
pub mod process;
pub mod process_impl;
pub mod process_mock;
pub mod runner;
pub mod runner_mock;

pub use fs::FsAdapter;
pub use fs_impl::StdFsAdapter;
pub use fs_mock::MockFsAdapter;
pub use process::{ProcessOutput, ProcessRunner};
pub use process_impl::GradleCommandRunner;
pub use process_mock::{MockProcessRunner, RecordedLaunch};
pub use runner::{EmbeddedRunner, RunnerOutcome, RunnerRequest};
pub use runner_mock::MockEmbeddedRunner;
