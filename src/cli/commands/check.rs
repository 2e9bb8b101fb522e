//! Check command implementation.
//!
//! The `teardownm check` command verifies prerequisites without touching
//! the filesystem.

use std::path::{Path, PathBuf};

use crate::cli::args::CheckArgs;
use crate::config::load_config;
use crate::error::Result;
use crate::prerequisites::{AggregateResult, CheckRunner, SystemCheckRunner, Verifier};
use crate::ui::{hints, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// Message shown when at least one prerequisite is missing.
pub const GATE_FAILED_MESSAGE: &str =
    "Please ensure you have all the pre-requisites before continuing";

/// Run every prerequisite check and report the gate.
///
/// Returns the aggregate; the caller decides what a failed gate means.
pub(super) fn run_prerequisite_gate(
    checks: &dyn CheckRunner,
    ui: &mut dyn UserInterface,
) -> AggregateResult {
    ui.show_header("Checking prerequisites");
    let aggregate = Verifier::default().run(checks, ui);

    if let Err(e) = aggregate.ensure_satisfied() {
        tracing::debug!("{}", e);
        ui.message("");
        ui.error(GATE_FAILED_MESSAGE);
        ui.show_hint(&hints::after_failed_prerequisites(&aggregate.failed));
    }

    aggregate
}

/// The check command implementation.
pub struct CheckCommand {
    root: PathBuf,
    config_path: Option<PathBuf>,
    args: CheckArgs,
    checks: Option<Box<dyn CheckRunner>>,
}

impl CheckCommand {
    /// Create a new check command probing the real machine.
    pub fn new(root: &Path, config_path: Option<&Path>, args: CheckArgs) -> Self {
        Self {
            root: root.to_path_buf(),
            config_path: config_path.map(Path::to_path_buf),
            args,
            checks: None,
        }
    }

    /// Replace the check runner.
    pub fn with_checks(mut self, checks: Box<dyn CheckRunner>) -> Self {
        self.checks = Some(checks);
        self
    }

    /// Get the command arguments.
    pub fn args(&self) -> &CheckArgs {
        &self.args
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = load_config(&self.root, self.config_path.as_deref())?;

        let host_checks;
        let checks: &dyn CheckRunner = match &self.checks {
            Some(checks) => checks.as_ref(),
            None => {
                host_checks = SystemCheckRunner::host(&self.root, config.game.clone());
                &host_checks
            }
        };

        let aggregate = run_prerequisite_gate(checks, ui);
        if !aggregate.is_satisfied() {
            return Ok(CommandResult::failure(1));
        }

        ui.success(&format!("All {} prerequisites found", aggregate.total));
        ui.show_hint(hints::after_successful_check());
        Ok(CommandResult::success())
    }
}
