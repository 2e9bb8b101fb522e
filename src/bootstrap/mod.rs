//! Working directory setup.
//!
//! - [`workspace`] - directory layout and single-level creation
//! - [`fetch`] - cloning repositories into fresh directories
//! - [`build`] - running the sledge build script
//! - [`bootstrapper`] - the sequence tying them together

pub mod bootstrapper;
pub mod build;
pub mod fetch;
pub mod workspace;

pub use bootstrapper::{BootstrapReport, Bootstrapper};
pub use build::{BuildOutput, BuildRunner, ScriptBuildRunner};
pub use fetch::{Fetcher, GitFetcher};
pub use workspace::{ensure_dir, DirectoryState, SledgeInstance, WorkingDirectorySet};
