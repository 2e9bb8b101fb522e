//! The directories a run creates under the install root.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::SetupConfig;
use crate::error::Result;

/// What [`ensure_dir`] found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryState {
    /// Already there; left untouched.
    Existing,
    /// Created by this call.
    Created,
}

impl DirectoryState {
    /// True if the directory was just created.
    pub fn is_fresh(&self) -> bool {
        matches!(self, DirectoryState::Created)
    }
}

/// Make sure `path` is a directory, creating it (one level) if missing.
///
/// The parent must already exist. A non-directory at `path` is an error.
pub fn ensure_dir(path: &Path) -> Result<DirectoryState> {
    if path.is_dir() {
        tracing::debug!("{} exists", path.display());
        return Ok(DirectoryState::Existing);
    }

    if path.exists() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} exists but is not a directory", path.display()),
        )
        .into());
    }

    fs::create_dir(path).map_err(|e| {
        io::Error::new(e.kind(), format!("Cannot create {}: {}", path.display(), e))
    })?;
    tracing::debug!("Created {}", path.display());
    Ok(DirectoryState::Created)
}

/// One sledge checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SledgeInstance {
    /// Folder name, e.g. `sledge1`.
    pub name: String,
    /// Absolute path under the install root.
    pub path: PathBuf,
}

/// All working directories, resolved against the install root.
#[derive(Debug, Clone)]
pub struct WorkingDirectorySet {
    root: PathBuf,
    sledge_parent: PathBuf,
    sledge_instances: Vec<SledgeInstance>,
    companion: PathBuf,
}

impl WorkingDirectorySet {
    /// Resolve the configured layout under `root`.
    pub fn from_config(root: &Path, config: &SetupConfig) -> Self {
        let sledge_parent = root.join(&config.sledge.directory);
        let sledge_instances = config
            .sledge
            .instances
            .iter()
            .map(|name| SledgeInstance {
                name: name.clone(),
                path: sledge_parent.join(name),
            })
            .collect();

        Self {
            root: root.to_path_buf(),
            sledge_parent,
            sledge_instances,
            companion: root.join(&config.companion.directory),
        }
    }

    /// Install root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Folder holding the sledge instances.
    pub fn sledge_parent(&self) -> &Path {
        &self.sledge_parent
    }

    /// Sledge instances in configured order.
    pub fn sledge_instances(&self) -> &[SledgeInstance] {
        &self.sledge_instances
    }

    /// Companion project folder.
    pub fn companion(&self) -> &Path {
        &self.companion
    }

    /// `path` relative to the root, for display.
    pub fn display_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn ensure_dir_creates_once() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("sledge");

        assert_eq!(ensure_dir(&dir).unwrap(), DirectoryState::Created);
        assert!(dir.is_dir());
        assert_eq!(ensure_dir(&dir).unwrap(), DirectoryState::Existing);
    }

    #[test]
    fn ensure_dir_rejects_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("sledge");
        fs::write(&file, "").unwrap();

        let err = ensure_dir(&file).unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }

    #[test]
    fn ensure_dir_needs_parent() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a").join("b");

        let err = ensure_dir(&nested).unwrap_err();
        assert!(err.to_string().contains(&nested.display().to_string()));
        assert!(!temp.path().join("a").exists());
    }

    #[test]
    fn default_layout() {
        let root = Path::new("install");
        let set = WorkingDirectorySet::from_config(root, &SetupConfig::default());

        assert_eq!(set.sledge_parent(), root.join("sledge"));
        let paths: Vec<_> = set.sledge_instances().iter().map(|i| i.path.clone()).collect();
        assert_eq!(
            paths,
            vec![root.join("sledge").join("sledge1"), root.join("sledge").join("sledge2")]
        );
        assert_eq!(set.companion(), root.join("teardownM-client"));
    }

    #[test]
    fn display_path_is_relative() {
        let root = Path::new("install");
        let set = WorkingDirectorySet::from_config(root, &SetupConfig::default());
        let shown = set.display_path(&set.sledge_instances()[0].path);
        assert_eq!(PathBuf::from(shown), Path::new("sledge").join("sledge1"));
    }

    #[test]
    fn fresh_state() {
        assert!(DirectoryState::Created.is_fresh());
        assert!(!DirectoryState::Existing.is_fresh());
    }
}
