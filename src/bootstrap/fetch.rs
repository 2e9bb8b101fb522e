//! Populating a directory from a git repository.

use anyhow::{bail, Context, Result};
use std::path::Path;
use std::process::Command;

/// Clones a repository into a directory.
pub trait Fetcher {
    /// Clone `url` into `dest`, which exists and is empty.
    fn fetch(&self, url: &str, dest: &Path) -> Result<()>;
}

/// Fetches with the `git` CLI, including submodules.
#[derive(Debug, Clone)]
pub struct GitFetcher {
    program: String,
}

impl Default for GitFetcher {
    fn default() -> Self {
        Self::new("git")
    }
}

impl GitFetcher {
    /// Create a fetcher invoking `program` as git.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Fetcher for GitFetcher {
    fn fetch(&self, url: &str, dest: &Path) -> Result<()> {
        tracing::debug!("git clone --recurse-submodules {} {}", url, dest.display());

        let output = Command::new(&self.program)
            .args(["clone", "--recurse-submodules", url])
            .arg(dest)
            .output()
            .with_context(|| format!("Could not run {}", self.program))?;

        if !output.status.success() {
            bail!(
                "Git clone failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(())
    }
}
