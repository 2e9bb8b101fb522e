//! Running the checks and aggregating the results.
//!
//! Every check runs exactly once, in order, whether or not an earlier one
//! failed. The Steam install path resolved by the host-app check is handed
//! to every later check.

use std::path::{Path, PathBuf};

use crate::config::GameConfig;
use crate::error::{Result, SetupError};
use crate::ui::UserInterface;

use super::check::{
    CheckOutcome, CheckSpec, OPENSSL_UNINSTALL_KEY, STEAM_INSTALL_PATH_VALUE, STEAM_KEY,
};
use super::game::locate_game;
use super::probe::{HostProbe, SystemProbe};

/// Evaluates a single check.
pub trait CheckRunner {
    /// Evaluate `spec`. `host_path` is the Steam path if one was resolved.
    fn run_check(
        &self,
        spec: CheckSpec,
        host_path: Option<&Path>,
        ui: &mut dyn UserInterface,
    ) -> CheckOutcome;
}

/// Runs checks against a [`SystemProbe`].
pub struct SystemCheckRunner {
    probe: Box<dyn SystemProbe>,
    game: GameConfig,
}

impl SystemCheckRunner {
    /// Create a runner over `probe`.
    pub fn new(probe: Box<dyn SystemProbe>, game: GameConfig) -> Self {
        Self { probe, game }
    }

    /// Runner probing the real machine, running commands in `root`.
    pub fn host(root: &Path, game: GameConfig) -> Self {
        Self::new(Box::new(HostProbe::in_dir(root)), game)
    }
}

impl CheckRunner for SystemCheckRunner {
    fn run_check(
        &self,
        spec: CheckSpec,
        host_path: Option<&Path>,
        ui: &mut dyn UserInterface,
    ) -> CheckOutcome {
        match spec {
            CheckSpec::BuildTool | CheckSpec::Sdk => CheckOutcome::from_bool(
                spec.probe_command()
                    .is_some_and(|cmd| self.probe.command_succeeds(cmd)),
            ),
            CheckSpec::CryptoLibrary => {
                CheckOutcome::from_bool(self.probe.registry_key_exists(OPENSSL_UNINSTALL_KEY))
            }
            CheckSpec::HostApp => self
                .probe
                .registry_string(STEAM_KEY, STEAM_INSTALL_PATH_VALUE)
                .map(|path| CheckOutcome::resolved(PathBuf::from(path)))
                .unwrap_or_else(CheckOutcome::fail),
            CheckSpec::TargetApp => CheckOutcome::from_bool(
                locate_game(host_path, &self.game, self.probe.as_ref(), ui).is_some(),
            ),
        }
    }
}

/// Pass/fail counts over the whole check list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateResult {
    /// Number of checks that passed.
    pub passed: usize,

    /// Number of checks run.
    pub total: usize,

    /// Identifiers of the failed checks, in run order.
    pub failed: Vec<String>,
}

impl AggregateResult {
    /// True only if every check passed.
    pub fn is_satisfied(&self) -> bool {
        self.passed == self.total
    }

    /// Convert an unsatisfied result into an error.
    pub fn ensure_satisfied(&self) -> Result<()> {
        if self.is_satisfied() {
            Ok(())
        } else {
            Err(SetupError::PrerequisitesUnsatisfied {
                passed: self.passed,
                total: self.total,
            })
        }
    }
}

/// Runs an ordered list of checks and reports each one.
#[derive(Debug, Clone)]
pub struct Verifier {
    checks: Vec<CheckSpec>,
}

impl Default for Verifier {
    fn default() -> Self {
        Self::new(CheckSpec::default_list())
    }
}

impl Verifier {
    /// Create a verifier for `checks`, run in the given order.
    pub fn new(checks: Vec<CheckSpec>) -> Self {
        Self { checks }
    }

    /// The checks this verifier runs.
    pub fn checks(&self) -> &[CheckSpec] {
        &self.checks
    }

    /// Run every check once and aggregate.
    pub fn run(&self, runner: &dyn CheckRunner, ui: &mut dyn UserInterface) -> AggregateResult {
        let total = self.checks.len();
        let mut progress = ui.start_progress("Checking prerequisites", total);
        let mut result = AggregateResult {
            total,
            ..Default::default()
        };
        let mut host_path: Option<PathBuf> = None;

        for spec in &self.checks {
            progress.set_title(&format!("Checking {}", spec.name()));

            let outcome = runner.run_check(*spec, host_path.as_deref(), ui);
            tracing::debug!(
                "Check {} passed={} resolved={:?}",
                spec,
                outcome.passed,
                outcome.resolved_path
            );

            if let Some(path) = outcome.resolved_path {
                host_path = Some(path);
            }

            if outcome.passed {
                ui.success(&spec.found_message());
                progress.increment();
                result.passed += 1;
            } else {
                ui.error(&spec.missing_message());
                ui.show_hint(spec.remediation());
                result.failed.push(spec.id().to_string());
            }
        }

        progress.finish();
        tracing::debug!("{} of {} prerequisites passed", result.passed, result.total);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::cell::RefCell;
    use std::collections::HashSet;

    /// Probe with canned answers.
    #[derive(Default)]
    struct FakeProbe {
        commands: HashSet<String>,
        keys: HashSet<String>,
        steam: Option<String>,
        dirs: HashSet<PathBuf>,
    }

    impl SystemProbe for FakeProbe {
        fn command_succeeds(&self, command: &str) -> bool {
            self.commands.contains(command)
        }

        fn registry_key_exists(&self, subkey: &str) -> bool {
            self.keys.contains(subkey)
        }

        fn registry_string(&self, _subkey: &str, _name: &str) -> Option<String> {
            self.steam.clone()
        }

        fn is_dir(&self, path: &Path) -> bool {
            self.dirs.contains(path)
        }
    }

    fn full_probe() -> FakeProbe {
        let steam = PathBuf::from("steam");
        FakeProbe {
            commands: ["cmake --version", "dotnet --version"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            keys: [OPENSSL_UNINSTALL_KEY.to_string()].into_iter().collect(),
            steam: Some("steam".to_string()),
            dirs: [GameConfig::default().resolve(&steam)].into_iter().collect(),
        }
    }

    /// Runner that passes only the listed checks and records calls.
    struct ScriptedRunner {
        passing: Vec<CheckSpec>,
        calls: RefCell<Vec<(CheckSpec, Option<PathBuf>)>>,
    }

    impl ScriptedRunner {
        fn new(passing: Vec<CheckSpec>) -> Self {
            Self {
                passing,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl CheckRunner for ScriptedRunner {
        fn run_check(
            &self,
            spec: CheckSpec,
            host_path: Option<&Path>,
            _ui: &mut dyn UserInterface,
        ) -> CheckOutcome {
            self.calls
                .borrow_mut()
                .push((spec, host_path.map(Path::to_path_buf)));
            if !self.passing.contains(&spec) {
                return CheckOutcome::fail();
            }
            if spec == CheckSpec::HostApp {
                CheckOutcome::resolved(PathBuf::from("C:/Steam"))
            } else {
                CheckOutcome::pass()
            }
        }
    }

    #[test]
    fn all_checks_pass_with_full_probe() {
        let runner = SystemCheckRunner::new(Box::new(full_probe()), GameConfig::default());
        let mut ui = MockUI::new();

        let result = Verifier::default().run(&runner, &mut ui);

        assert!(result.is_satisfied());
        assert_eq!(result.passed, 5);
        assert!(ui.has_success("cmake found!"));
        assert!(ui.has_success("Teardown found!"));
        assert!(ui.prompts_shown().is_empty());
    }

    #[test]
    fn missing_openssl_reports_hint() {
        let mut probe = full_probe();
        probe.keys.clear();
        let runner = SystemCheckRunner::new(Box::new(probe), GameConfig::default());
        let mut ui = MockUI::new();

        let result = Verifier::default().run(&runner, &mut ui);

        assert_eq!(result.passed, 4);
        assert_eq!(result.failed, vec!["openssl"]);
        assert!(ui.has_error("OpenSSL could not be found."));
        assert!(ui.has_hint("slproweb.com"));
    }

    #[test]
    fn missing_steam_falls_back_to_prompt() {
        let mut probe = full_probe();
        probe.steam = None;
        let runner = SystemCheckRunner::new(Box::new(probe), GameConfig::default());
        let mut ui = MockUI::new();
        ui.set_prompt_response("alternate_path", "No");

        let result = Verifier::default().run(&runner, &mut ui);

        assert_eq!(result.failed, vec!["steam", "teardown"]);
        assert_eq!(ui.prompts_shown(), &["alternate_path"]);
    }

    #[test]
    fn aggregation_over_every_subset() {
        let all = CheckSpec::default_list();
        for mask in 0u32..32 {
            let passing: Vec<CheckSpec> = all
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, c)| *c)
                .collect();
            let runner = ScriptedRunner::new(passing.clone());
            let mut ui = MockUI::new();

            let result = Verifier::default().run(&runner, &mut ui);

            assert_eq!(result.total, 5);
            assert_eq!(result.passed, passing.len(), "mask {:#07b}", mask);
            assert_eq!(result.is_satisfied(), mask == 0b11111, "mask {:#07b}", mask);
            assert_eq!(ui.progress().position, passing.len());
            assert_eq!(result.failed.len(), 5 - passing.len());
        }
    }

    #[test]
    fn failing_first_check_does_not_short_circuit() {
        let runner = ScriptedRunner::new(vec![
            CheckSpec::CryptoLibrary,
            CheckSpec::Sdk,
            CheckSpec::HostApp,
            CheckSpec::TargetApp,
        ]);
        let mut ui = MockUI::new();

        let result = Verifier::default().run(&runner, &mut ui);

        let order: Vec<CheckSpec> = runner.calls.borrow().iter().map(|(c, _)| *c).collect();
        assert_eq!(order, CheckSpec::default_list());
        assert_eq!(result.passed, 4);
        assert_eq!(result.failed, vec!["cmake"]);
    }

    #[test]
    fn host_path_flows_to_later_checks() {
        let runner = ScriptedRunner::new(CheckSpec::default_list());
        let mut ui = MockUI::new();

        Verifier::default().run(&runner, &mut ui);

        let calls = runner.calls.borrow();
        let (spec, host) = &calls[4];
        assert_eq!(*spec, CheckSpec::TargetApp);
        assert_eq!(host.as_deref(), Some(Path::new("C:/Steam")));
        assert!(calls[3].1.is_none());
    }

    #[test]
    fn progress_titles_follow_checks() {
        let runner = ScriptedRunner::new(vec![]);
        let mut ui = MockUI::new();

        Verifier::default().run(&runner, &mut ui);

        let log = ui.progress();
        assert_eq!(log.titles[0], "Checking prerequisites");
        assert_eq!(log.titles[1], "Checking cmake");
        assert_eq!(log.titles[5], "Checking Teardown");
        assert!(log.finished);
    }

    #[test]
    fn ensure_satisfied_errors_on_shortfall() {
        let result = AggregateResult {
            passed: 4,
            total: 5,
            failed: vec!["steam".to_string()],
        };
        assert!(matches!(
            result.ensure_satisfied(),
            Err(SetupError::PrerequisitesUnsatisfied { passed: 4, total: 5 })
        ));
    }
}
