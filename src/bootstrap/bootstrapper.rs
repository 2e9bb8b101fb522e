//! Creating, populating and building the working directories.
//!
//! A directory is cloned into only right after this run created it.
//! Existing directories are trusted as already populated. When a clone
//! fails the fresh directory is removed again so the next run retries.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::SetupConfig;
use crate::error::{Result, SetupError};
use crate::ui::{SpinnerHandle, UserInterface};

use super::build::{BuildOutput, BuildRunner};
use super::fetch::Fetcher;
use super::workspace::{ensure_dir, DirectoryState, WorkingDirectorySet};

/// What a bootstrap run did.
#[derive(Debug, Clone)]
pub struct BootstrapReport {
    /// State of each sledge instance before this run, in order.
    pub sledge: Vec<(PathBuf, DirectoryState)>,
    /// Build output per sledge instance, in order.
    pub builds: Vec<BuildOutput>,
    /// State of the companion folder before this run.
    pub companion: DirectoryState,
}

/// Sets up the sledge checkouts and the companion folder.
pub struct Bootstrapper<'a> {
    dirs: WorkingDirectorySet,
    repository: String,
    build_script: String,
    companion_repository: Option<String>,
    fetcher: &'a dyn Fetcher,
    builder: &'a dyn BuildRunner,
}

impl<'a> Bootstrapper<'a> {
    /// Create a bootstrapper for `config` under `root`.
    pub fn new(
        root: &Path,
        config: &SetupConfig,
        fetcher: &'a dyn Fetcher,
        builder: &'a dyn BuildRunner,
    ) -> Self {
        Self {
            dirs: WorkingDirectorySet::from_config(root, config),
            repository: config.sledge.repository.clone(),
            build_script: config.sledge.build_script.clone(),
            companion_repository: config.companion.repository.clone(),
            fetcher,
            builder,
        }
    }

    /// The resolved directory layout.
    pub fn directories(&self) -> &WorkingDirectorySet {
        &self.dirs
    }

    /// Prepare and build every sledge instance, then the companion folder.
    pub fn run(&self, ui: &mut dyn UserInterface) -> Result<BootstrapReport> {
        ui.show_header("Sledge");
        let sledge = self.prepare_sledge(ui)?;

        let mut builds = Vec::with_capacity(sledge.len());
        for (index, instance) in self.dirs.sledge_instances().iter().enumerate() {
            ui.show_header(&format!("Sledge {}", index + 1));
            builds.push(self.build_instance(&instance.name, &instance.path, ui)?);
        }

        ui.show_header("TeardownM");
        let companion = self.ensure_companion(ui)?;

        Ok(BootstrapReport {
            sledge,
            builds,
            companion,
        })
    }

    /// Make sure every sledge instance exists, cloning into fresh ones.
    pub fn prepare_sledge(
        &self,
        ui: &mut dyn UserInterface,
    ) -> Result<Vec<(PathBuf, DirectoryState)>> {
        let mut spinner = ui.start_spinner("Checking if sledge folder exists");

        if ensure_dir(self.dirs.sledge_parent())?.is_fresh() {
            spinner.set_message("Sledge folder not found, created it");
        }

        let mut states = Vec::new();
        for instance in self.dirs.sledge_instances() {
            let state = ensure_dir(&instance.path)?;
            if state.is_fresh() {
                spinner.set_message(&format!("Downloading Sledge into {}", instance.name));
                self.populate(&self.repository, &instance.path, spinner.as_mut())?;
            } else {
                tracing::debug!("{} already exists, not fetching", instance.path.display());
            }
            states.push((instance.path.clone(), state));
        }

        if states.iter().any(|(_, s)| s.is_fresh()) {
            spinner.finish_success("Sledge cloned");
        } else {
            spinner.finish_skipped("Sledge folders already exist");
        }

        Ok(states)
    }

    /// Run the build script in one sledge instance.
    pub fn build_instance(
        &self,
        name: &str,
        dir: &Path,
        ui: &mut dyn UserInterface,
    ) -> Result<BuildOutput> {
        ui.message(&format!(
            "Running '{}' in {}",
            self.build_script,
            self.dirs.display_path(dir)
        ));

        match self.builder.build(dir, &self.build_script) {
            Ok(output) => {
                ui.success(&format!("{} built", name));
                Ok(output)
            }
            Err(e) => {
                ui.error(&format!("{} failed to build", name));
                Err(e)
            }
        }
    }

    /// Make sure the companion folder exists.
    ///
    /// A fresh folder is cloned into when a repository is configured;
    /// otherwise a warning says it has to be filled manually.
    pub fn ensure_companion(&self, ui: &mut dyn UserInterface) -> Result<DirectoryState> {
        let dir = self.dirs.companion();
        let shown = self.dirs.display_path(dir);
        let mut spinner = ui.start_spinner(&format!("Checking if {} folder exists", shown));

        let state = ensure_dir(dir)?;
        if !state.is_fresh() {
            spinner.finish_skipped(&format!("{} folder already exists", shown));
            return Ok(state);
        }

        spinner.set_message(&format!("{} folder not found, created it", shown));

        match &self.companion_repository {
            Some(url) => {
                spinner.set_message(&format!("Downloading {}", shown));
                self.populate(url, dir, spinner.as_mut())?;
                spinner.finish_success(&format!("{} cloned", shown));
            }
            None => {
                spinner.finish_success(&format!("{} folder created", shown));
                ui.warning(&format!(
                    "No companion repository configured; fetch the {} project into {} manually.",
                    shown,
                    dir.display()
                ));
            }
        }

        Ok(state)
    }

    fn populate(&self, url: &str, dest: &Path, spinner: &mut dyn SpinnerHandle) -> Result<()> {
        if let Err(e) = self.fetcher.fetch(url, dest) {
            spinner.finish_error(&format!("Could not download {}", url));
            if let Err(cleanup) = fs::remove_dir_all(dest) {
                tracing::warn!("Could not remove {}: {}", dest.display(), cleanup);
            }
            return Err(SetupError::FetchFailed {
                url: url.to_string(),
                path: dest.to_path_buf(),
                message: format!("{:#}", e),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::cell::RefCell;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingFetcher {
        calls: RefCell<Vec<(String, PathBuf)>>,
        fail: bool,
    }

    impl Fetcher for RecordingFetcher {
        fn fetch(&self, url: &str, dest: &Path) -> anyhow::Result<()> {
            self.calls
                .borrow_mut()
                .push((url.to_string(), dest.to_path_buf()));
            if self.fail {
                anyhow::bail!("network unreachable");
            }
            fs::write(dest.join("Create project.bat"), "")?;
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingBuilder {
        dirs: RefCell<Vec<PathBuf>>,
        fail_on: Option<usize>,
    }

    impl BuildRunner for RecordingBuilder {
        fn build(&self, dir: &Path, script: &str) -> Result<BuildOutput> {
            let index = self.dirs.borrow().len();
            self.dirs.borrow_mut().push(dir.to_path_buf());
            if self.fail_on == Some(index) {
                return Err(SetupError::BuildFailed {
                    script: script.to_string(),
                    dir: dir.to_path_buf(),
                    code: Some(1),
                });
            }
            Ok(BuildOutput {
                combined: format!("built {}\n", dir.display()),
            })
        }
    }

    #[test]
    fn fresh_root_creates_fetches_and_builds() {
        let temp = TempDir::new().unwrap();
        let fetcher = RecordingFetcher::default();
        let builder = RecordingBuilder::default();
        let config = SetupConfig::default();
        let boot = Bootstrapper::new(temp.path(), &config, &fetcher, &builder);
        let mut ui = MockUI::new();

        let report = boot.run(&mut ui).unwrap();

        let sledge = temp.path().join("sledge");
        assert!(sledge.join("sledge1").is_dir());
        assert!(sledge.join("sledge2").is_dir());
        assert!(temp.path().join("teardownM-client").is_dir());
        assert_eq!(fetcher.calls.borrow().len(), 2);
        assert_eq!(
            *builder.dirs.borrow(),
            vec![sledge.join("sledge1"), sledge.join("sledge2")]
        );
        assert_eq!(report.builds.len(), 2);
        assert_eq!(report.companion, DirectoryState::Created);
        assert!(ui.has_warning("manually"));
    }

    #[test]
    fn second_run_does_not_refetch() {
        let temp = TempDir::new().unwrap();
        let fetcher = RecordingFetcher::default();
        let builder = RecordingBuilder::default();
        let config = SetupConfig::default();
        let boot = Bootstrapper::new(temp.path(), &config, &fetcher, &builder);

        boot.run(&mut MockUI::new()).unwrap();
        let report = boot.run(&mut MockUI::new()).unwrap();

        assert_eq!(fetcher.calls.borrow().len(), 2);
        assert!(report
            .sledge
            .iter()
            .all(|(_, s)| *s == DirectoryState::Existing));
        assert_eq!(report.companion, DirectoryState::Existing);
        assert_eq!(builder.dirs.borrow().len(), 4);
    }

    #[test]
    fn existing_instance_is_skipped() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("sledge").join("sledge1")).unwrap();
        let fetcher = RecordingFetcher::default();
        let builder = RecordingBuilder::default();
        let config = SetupConfig::default();
        let boot = Bootstrapper::new(temp.path(), &config, &fetcher, &builder);

        boot.prepare_sledge(&mut MockUI::new()).unwrap();

        let calls = fetcher.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, temp.path().join("sledge").join("sledge2"));
        assert_eq!(calls[0].0, "https://github.com/44lr/sledge.git");
    }

    #[test]
    fn failed_fetch_removes_fresh_dir() {
        let temp = TempDir::new().unwrap();
        let fetcher = RecordingFetcher {
            fail: true,
            ..Default::default()
        };
        let builder = RecordingBuilder::default();
        let config = SetupConfig::default();
        let boot = Bootstrapper::new(temp.path(), &config, &fetcher, &builder);

        let err = boot.run(&mut MockUI::new()).unwrap_err();

        assert!(matches!(err, SetupError::FetchFailed { .. }));
        assert!(err.to_string().contains("network unreachable"));
        assert!(!temp.path().join("sledge").join("sledge1").exists());
        assert!(builder.dirs.borrow().is_empty());
    }

    #[test]
    fn build_failure_stops_run() {
        let temp = TempDir::new().unwrap();
        let fetcher = RecordingFetcher::default();
        let builder = RecordingBuilder {
            fail_on: Some(0),
            ..Default::default()
        };
        let config = SetupConfig::default();
        let boot = Bootstrapper::new(temp.path(), &config, &fetcher, &builder);
        let mut ui = MockUI::new();

        let err = boot.run(&mut ui).unwrap_err();

        assert!(matches!(err, SetupError::BuildFailed { .. }));
        assert_eq!(builder.dirs.borrow().len(), 1);
        assert!(!temp.path().join("teardownM-client").exists());
        assert!(ui.has_error("sledge1 failed to build"));
    }

    #[test]
    fn configured_companion_repository_is_fetched() {
        let temp = TempDir::new().unwrap();
        let fetcher = RecordingFetcher::default();
        let builder = RecordingBuilder::default();
        let mut config = SetupConfig::default();
        config.companion.repository = Some("https://example.com/client.git".to_string());
        let boot = Bootstrapper::new(temp.path(), &config, &fetcher, &builder);
        let mut ui = MockUI::new();

        boot.ensure_companion(&mut ui).unwrap();

        let calls = fetcher.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "https://example.com/client.git");
        assert!(ui.warnings().is_empty());
    }

    #[test]
    fn run_shows_sections() {
        let temp = TempDir::new().unwrap();
        let fetcher = RecordingFetcher::default();
        let builder = RecordingBuilder::default();
        let config = SetupConfig::default();
        let boot = Bootstrapper::new(temp.path(), &config, &fetcher, &builder);
        let mut ui = MockUI::new();

        boot.run(&mut ui).unwrap();

        assert_eq!(ui.headers(), &["Sledge", "Sledge 1", "Sledge 2", "TeardownM"]);
        assert!(ui.has_success("sledge2 built"));
    }
}
