//! Run command implementation.
//!
//! The `teardownm run` command checks prerequisites and, only if all of
//! them pass, clones and builds sledge and prepares the client folder.

use std::path::{Path, PathBuf};

use crate::bootstrap::{Bootstrapper, BuildRunner, Fetcher, GitFetcher, ScriptBuildRunner};
use crate::cli::args::RunArgs;
use crate::config::load_config;
use crate::error::{Result, SetupError};
use crate::prerequisites::{CheckRunner, SystemCheckRunner};
use crate::ui::{hints, UserInterface};

use super::check::run_prerequisite_gate;
use super::dispatcher::{Command, CommandResult};

/// The run command implementation.
pub struct RunCommand {
    root: PathBuf,
    config_path: Option<PathBuf>,
    args: RunArgs,
    checks: Option<Box<dyn CheckRunner>>,
    fetcher: Option<Box<dyn Fetcher>>,
    builder: Option<Box<dyn BuildRunner>>,
}

impl RunCommand {
    /// Create a new run command using the real machine, git and build script.
    pub fn new(root: &Path, config_path: Option<&Path>, args: RunArgs) -> Self {
        Self {
            root: root.to_path_buf(),
            config_path: config_path.map(Path::to_path_buf),
            args,
            checks: None,
            fetcher: None,
            builder: None,
        }
    }

    /// Replace the check runner, fetcher and build runner.
    pub fn with_components(
        mut self,
        checks: Box<dyn CheckRunner>,
        fetcher: Box<dyn Fetcher>,
        builder: Box<dyn BuildRunner>,
    ) -> Self {
        self.checks = Some(checks);
        self.fetcher = Some(fetcher);
        self.builder = Some(builder);
        self
    }

    /// Get the install root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the command arguments.
    pub fn args(&self) -> &RunArgs {
        &self.args
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = load_config(&self.root, self.config_path.as_deref())?;

        ui.show_banner();

        let host_checks;
        let checks: &dyn CheckRunner = match &self.checks {
            Some(checks) => checks.as_ref(),
            None => {
                host_checks = SystemCheckRunner::host(&self.root, config.game.clone());
                &host_checks
            }
        };

        if !run_prerequisite_gate(checks, ui).is_satisfied() {
            return Ok(CommandResult::failure(1));
        }

        let git = GitFetcher::default();
        let fetcher: &dyn Fetcher = match &self.fetcher {
            Some(fetcher) => fetcher.as_ref(),
            None => &git,
        };

        let script = ScriptBuildRunner::default();
        let builder: &dyn BuildRunner = match &self.builder {
            Some(builder) => builder.as_ref(),
            None => &script,
        };

        let bootstrapper = Bootstrapper::new(&self.root, &config, fetcher, builder);
        match bootstrapper.run(ui) {
            Ok(report) => {
                tracing::debug!(
                    "Bootstrap finished: {} sledge builds, companion {:?}",
                    report.builds.len(),
                    report.companion
                );
                ui.success("teardownM environment is ready");
                ui.show_hint(hints::after_successful_run());
                Ok(CommandResult::success())
            }
            Err(e @ SetupError::FetchFailed { .. }) => {
                ui.error(&e.to_string());
                ui.show_hint(hints::after_failed_fetch());
                Ok(CommandResult::failure(2))
            }
            Err(e) => Err(e),
        }
    }
}
