//! Bootstrap sequence orchestration.
//!
//! ```text
//! Start → RuntimeCheck → {exit 1 | DependencyCheck}
//!       → {InstallDependencies → Launch | Launch}
//!       → AwaitAcknowledgment → End
//! ```
//!
//! Each stage runs at most once and strictly after the one before it.
//! There are no retries and no way back.

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::LauncherConfig;
use crate::error::LaunchError;
use crate::messages::Messages;
use crate::requirements::{
    install_dependencies, probe_module, probe_runtime, CheckResult, InstallOutcome,
    RuntimeStatus, RuntimeVersion,
};
use crate::shell::ProcessRunner;
use crate::ui::UserInterface;

use super::launch::{launch_entry_point, LaunchOutcome};

/// Exit code for a launcher that could not hand over to the application.
pub const EXIT_FAILURE: i32 = 1;

/// A stage of the bootstrap sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    RuntimeCheck,
    DependencyCheck,
    InstallDependencies,
    Launch,
    AwaitAcknowledgment,
}

/// What happened during one launcher run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchReport {
    /// Stages entered, in order.
    pub stages: Vec<Stage>,
    /// Result of the runtime probe.
    pub runtime: Option<RuntimeStatus>,
    /// Result of the dependency probe, if it ran.
    pub dependency: Option<CheckResult>,
    /// Result of installation, if it ran.
    pub install: Option<InstallOutcome>,
    /// Result of the application run, if it was attempted.
    pub launch: Option<LaunchOutcome>,
    /// The launcher's own exit code.
    pub exit_code: i32,
}

impl LaunchReport {
    fn new() -> Self {
        Self {
            stages: Vec::new(),
            runtime: None,
            dependency: None,
            install: None,
            launch: None,
            exit_code: 0,
        }
    }

    fn enter(&mut self, stage: Stage) {
        debug!("Entering stage {:?}", stage);
        self.stages.push(stage);
    }

    /// Whether `stage` was entered.
    pub fn visited(&self, stage: Stage) -> bool {
        self.stages.contains(&stage)
    }

    /// The exit code narrowed to what a process can return.
    ///
    /// Codes outside `0..=255` (Windows status values, negative codes)
    /// become [`EXIT_FAILURE`].
    pub fn process_exit_code(&self) -> u8 {
        Self::narrow_exit_code(self.exit_code)
    }

    /// Narrow any launcher exit code the same way.
    pub fn narrow_exit_code(code: i32) -> u8 {
        u8::try_from(code).unwrap_or(EXIT_FAILURE as u8)
    }
}

/// Runs the bootstrap sequence for one project.
pub struct Launcher<'a> {
    config: &'a LauncherConfig,
    project_root: PathBuf,
    messages: Messages,
}

impl<'a> Launcher<'a> {
    /// Create a launcher, with messages in the configured locale.
    pub fn new(config: &'a LauncherConfig, project_root: &Path) -> Self {
        Self {
            config,
            project_root: project_root.to_path_buf(),
            messages: Messages::new(config.resolved_locale()),
        }
    }

    /// Override the message catalog.
    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    /// Run every stage and report what happened.
    ///
    /// Never fails: each step's problems are part of the report, and the
    /// exit code in the report is what the process should exit with.
    pub fn run(
        &self,
        runner: &mut dyn ProcessRunner,
        ui: &mut dyn UserInterface,
    ) -> LaunchReport {
        let mut report = LaunchReport::new();
        ui.show_header(&self.messages.header());

        if !self.check_runtime(runner, ui, &mut report) {
            report.exit_code = EXIT_FAILURE;
            self.acknowledge(ui, &mut report);
            return report;
        }

        if !self.ensure_dependencies(runner, ui, &mut report) {
            ui.error(&self.messages.strict_abort());
            report.exit_code = EXIT_FAILURE;
            self.acknowledge(ui, &mut report);
            return report;
        }

        report.enter(Stage::Launch);
        ui.message(&self.messages.launching(&self.config.entry_point));
        let outcome = launch_entry_point(self.config, &self.project_root, runner);
        match &outcome {
            LaunchOutcome::Exited { exit_code: Some(0) } => {}
            LaunchOutcome::Exited { exit_code } => {
                ui.warning(&self.messages.app_exited_with_error(*exit_code));
            }
            LaunchOutcome::SpawnFailed { message } => {
                ui.error(&self.messages.launch_failed(message));
            }
        }
        report.exit_code = self.exit_code_for(&outcome);
        report.launch = Some(outcome);

        self.acknowledge(ui, &mut report);
        info!("Launcher finished with exit code {}", report.exit_code);
        report
    }

    /// Returns false when the runtime is absent.
    fn check_runtime(
        &self,
        runner: &mut dyn ProcessRunner,
        ui: &mut dyn UserInterface,
        report: &mut LaunchReport,
    ) -> bool {
        report.enter(Stage::RuntimeCheck);
        let mut spinner = ui.start_spinner(&self.messages.checking_runtime(&self.config.runtime));
        let status = probe_runtime(self.config, &self.project_root, runner);

        let present = match &status {
            RuntimeStatus::Absent => {
                spinner.finish_error(&self.messages.runtime_not_found());
                ui.error(&self.messages.runtime_missing(&self.config.min_runtime_version));
                ui.message(&self.messages.runtime_download_hint());
                false
            }
            RuntimeStatus::Present { .. } => {
                let version = status.version();
                let shown = version.map(|v| v.to_string());
                spinner.finish_success(&self.messages.runtime_found(shown.as_deref()));
                if let Some(found) = version {
                    self.warn_if_outdated(&found, ui);
                }
                true
            }
        };

        report.runtime = Some(status);
        present
    }

    fn warn_if_outdated(&self, found: &RuntimeVersion, ui: &mut dyn UserInterface) {
        let Ok(minimum) = self.config.min_runtime_version.parse::<RuntimeVersion>() else {
            return;
        };
        if !found.satisfies(&minimum) {
            warn!("Runtime {} is older than minimum {}", found, minimum);
            ui.warning(
                &self
                    .messages
                    .runtime_too_old(&found.to_string(), &self.config.min_runtime_version),
            );
        }
    }

    /// Probe the dependency and install if needed.
    ///
    /// Returns false only when strict mode refuses to continue.
    fn ensure_dependencies(
        &self,
        runner: &mut dyn ProcessRunner,
        ui: &mut dyn UserInterface,
        report: &mut LaunchReport,
    ) -> bool {
        report.enter(Stage::DependencyCheck);
        let mut spinner =
            ui.start_spinner(&self.messages.checking_dependency(&self.config.required_module));
        let dependency = probe_module(self.config, &self.project_root, runner);
        report.dependency = Some(dependency);

        if dependency.is_present() {
            spinner.finish_success(&self.messages.dependency_found());
            return true;
        }
        spinner.finish_error(&self.messages.dependency_missing());

        report.enter(Stage::InstallDependencies);
        let outcome = install_dependencies(self.config, &self.project_root, runner);
        match &outcome {
            InstallOutcome::Succeeded => ui.success(&self.messages.install_succeeded()),
            InstallOutcome::Failed { exit_code } => {
                ui.warning(&self.messages.install_failed(*exit_code))
            }
            InstallOutcome::ManifestMissing { path } => {
                ui.warning(&self.messages.manifest_missing(path))
            }
            InstallOutcome::SpawnFailed { message } => {
                ui.warning(&self.messages.install_spawn_failed(message))
            }
        }

        let proceed = outcome.is_success() || !self.config.strict;
        if !outcome.is_success() && proceed {
            warn!("Continuing to launch after install outcome {:?}", outcome);
        }
        report.install = Some(outcome);
        proceed
    }

    fn exit_code_for(&self, outcome: &LaunchOutcome) -> i32 {
        if !self.config.strict {
            return 0;
        }
        match outcome {
            LaunchOutcome::Exited { exit_code } => exit_code.unwrap_or(EXIT_FAILURE),
            LaunchOutcome::SpawnFailed { .. } => EXIT_FAILURE,
        }
    }

    fn acknowledge(&self, ui: &mut dyn UserInterface, report: &mut LaunchReport) {
        if !self.config.pause_on_exit {
            return;
        }
        report.enter(Stage::AwaitAcknowledgment);
        await_acknowledgment(&self.messages, ui);
    }
}

/// Show the exit prompt and wait for the operator.
///
/// The wording follows how the UI reads the answer: a single key on a
/// console, a whole line when output is redirected.
pub fn await_acknowledgment(messages: &Messages, ui: &mut dyn UserInterface) {
    let interactive = ui.is_interactive();
    debug!("Awaiting acknowledgment (interactive: {})", interactive);
    let prompt = if interactive {
        messages.press_any_key()
    } else {
        messages.press_enter()
    };
    if let Err(e) = ui.pause(&prompt) {
        debug!("Acknowledgment prompt ended early: {}", e);
    }
}

/// Report a configuration that could not be loaded.
///
/// Nothing has been spawned at this point. The diagnostic still gets the
/// exit pause, since the console may close as soon as the launcher exits.
/// Returns the launcher's exit code.
pub fn report_config_failure(
    error: &LaunchError,
    messages: &Messages,
    pause: bool,
    ui: &mut dyn UserInterface,
) -> i32 {
    warn!("Configuration failed to load: {}", error);
    ui.error(&messages.config_failed(&error.to_string()));
    if pause {
        await_acknowledgment(messages, ui);
    }
    EXIT_FAILURE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Locale;
    use crate::shell::{RecordingRunner, ScriptedResponse, StdioMode};
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    const VERSION: &str = "--version";
    const IMPORT: &str = "import PyQt5";
    const INSTALL: &str = "pip install";
    const LAUNCH: &str = "main.py";

    fn project() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("requirements.txt"), "PyQt5\n").unwrap();
        fs::write(temp.path().join("main.py"), "print('hi')\n").unwrap();
        temp
    }

    fn english(config: LauncherConfig) -> LauncherConfig {
        LauncherConfig {
            locale: Some(Locale::En),
            ..config
        }
    }

    fn run(config: &LauncherConfig, runner: &mut RecordingRunner) -> (LaunchReport, MockUI) {
        let temp = project();
        let mut ui = MockUI::new();
        let report = Launcher::new(config, temp.path()).run(runner, &mut ui);
        (report, ui)
    }

    #[test]
    fn runtime_absent_exits_nonzero_without_other_steps() {
        let config = english(LauncherConfig::default());
        let mut runner = RecordingRunner::new().with_response(VERSION, ScriptedResponse::SpawnError);
        let (report, ui) = run(&config, &mut runner);

        assert_ne!(report.exit_code, 0);
        assert_eq!(runner.calls().len(), 1);
        assert_eq!(
            report.stages,
            vec![Stage::RuntimeCheck, Stage::AwaitAcknowledgment]
        );
        assert!(report.dependency.is_none());
        assert!(report.launch.is_none());
        assert!(ui.has_message("python.org"));
    }

    #[test]
    fn runtime_absent_diagnostic_names_minimum_version() {
        let config = english(LauncherConfig {
            min_runtime_version: "3.8".to_string(),
            ..Default::default()
        });
        let mut runner = RecordingRunner::new().with_response(VERSION, ScriptedResponse::Exit(1));
        let temp = project();
        let mut ui = MockUI::new();
        let report = Launcher::new(&config, temp.path())
            .with_messages(Messages::new(Locale::En))
            .run(&mut runner, &mut ui);

        assert_eq!(report.exit_code, EXIT_FAILURE);
        assert_eq!(report.runtime, Some(RuntimeStatus::Absent));
        assert!(ui.has_error("install Python 3.8"));
    }

    #[test]
    fn dependency_present_spawns_probe_probe_launch_only() {
        let config = english(LauncherConfig::default());
        let mut runner = RecordingRunner::new();
        let (report, _ui) = run(&config, &mut runner);

        assert_eq!(runner.count_matching(INSTALL), 0);
        assert_eq!(runner.count_matching(VERSION), 1);
        assert_eq!(runner.count_matching(LAUNCH), 1);
        assert!(!report.visited(Stage::InstallDependencies));
        assert_eq!(report.exit_code, 0);
    }

    #[test]
    fn dependency_absent_installs_once_before_launch() {
        let config = english(LauncherConfig::default());
        let mut runner = RecordingRunner::new().with_response(IMPORT, ScriptedResponse::Exit(1));
        let (report, ui) = run(&config, &mut runner);

        assert_eq!(runner.calls().len(), 4);
        assert_eq!(runner.position_of(VERSION), Some(0));
        assert_eq!(runner.position_of(IMPORT), Some(1));
        assert_eq!(runner.position_of(INSTALL), Some(2));
        assert_eq!(runner.position_of(LAUNCH), Some(3));
        assert_eq!(runner.count_matching(INSTALL), 1);
        assert_eq!(report.install, Some(InstallOutcome::Succeeded));
        assert!(ui.has_success("installed"));
    }

    #[test]
    fn failed_install_still_launches_when_lenient() {
        let config = english(LauncherConfig::default());
        let mut runner = RecordingRunner::new()
            .with_response(IMPORT, ScriptedResponse::Exit(1))
            .with_response(INSTALL, ScriptedResponse::Exit(1));
        let (report, ui) = run(&config, &mut runner);

        assert_eq!(
            report.install,
            Some(InstallOutcome::Failed { exit_code: Some(1) })
        );
        assert_eq!(runner.count_matching(LAUNCH), 1);
        assert_eq!(report.exit_code, 0);
        assert!(ui.has_warning("exit code 1"));
    }

    #[test]
    fn failed_install_aborts_when_strict() {
        let config = english(LauncherConfig {
            strict: true,
            ..Default::default()
        });
        let mut runner = RecordingRunner::new()
            .with_response(IMPORT, ScriptedResponse::Exit(1))
            .with_response(INSTALL, ScriptedResponse::Exit(1));
        let (report, ui) = run(&config, &mut runner);

        assert_eq!(runner.count_matching(LAUNCH), 0);
        assert_eq!(report.exit_code, EXIT_FAILURE);
        assert!(ui.has_error("launch cancelled"));
        assert_eq!(report.stages.last(), Some(&Stage::AwaitAcknowledgment));
    }

    #[test]
    fn lenient_mode_hides_application_exit_code() {
        let config = english(LauncherConfig::default());
        let mut runner = RecordingRunner::new().with_response(LAUNCH, ScriptedResponse::Exit(3));
        let (report, ui) = run(&config, &mut runner);

        assert_eq!(report.launch, Some(LaunchOutcome::Exited { exit_code: Some(3) }));
        assert_eq!(report.exit_code, 0);
        assert!(ui.has_warning("exit code 3"));
    }

    #[test]
    fn strict_mode_propagates_application_exit_code() {
        let config = english(LauncherConfig {
            strict: true,
            ..Default::default()
        });
        let mut runner = RecordingRunner::new().with_response(LAUNCH, ScriptedResponse::Exit(3));
        let (report, _ui) = run(&config, &mut runner);
        assert_eq!(report.exit_code, 3);
    }

    #[test]
    fn launch_spawn_failure_is_reported() {
        let config = english(LauncherConfig::default());
        let mut runner =
            RecordingRunner::new().with_response(LAUNCH, ScriptedResponse::SpawnError);
        let (report, ui) = run(&config, &mut runner);

        assert!(matches!(
            report.launch,
            Some(LaunchOutcome::SpawnFailed { .. })
        ));
        assert!(ui.has_error("Could not start the application"));
        assert_eq!(report.exit_code, 0);
    }

    #[test]
    fn acknowledgment_comes_after_launch() {
        let config = english(LauncherConfig::default());
        let mut runner = RecordingRunner::new();
        let (report, ui) = run(&config, &mut runner);

        assert_eq!(
            report.stages,
            vec![
                Stage::RuntimeCheck,
                Stage::DependencyCheck,
                Stage::Launch,
                Stage::AwaitAcknowledgment
            ]
        );
        assert_eq!(ui.pauses().len(), 1);
    }

    #[test]
    fn no_pause_when_disabled() {
        let config = english(LauncherConfig {
            pause_on_exit: false,
            ..Default::default()
        });
        let mut runner = RecordingRunner::new();
        let (report, ui) = run(&config, &mut runner);

        assert!(!report.visited(Stage::AwaitAcknowledgment));
        assert!(ui.pauses().is_empty());
    }

    #[test]
    fn outdated_runtime_warns_but_continues() {
        let config = english(LauncherConfig::default());
        let mut runner = RecordingRunner::new().with_response(
            VERSION,
            ScriptedResponse::Output {
                code: 0,
                stdout: String::new(),
                stderr: "Python 2.7.18\n".to_string(),
            },
        );
        let (report, ui) = run(&config, &mut runner);

        assert!(ui.has_warning("2.7.18"));
        assert!(report.visited(Stage::Launch));
    }

    #[test]
    fn probes_capture_and_install_and_launch_inherit() {
        let config = english(LauncherConfig::default());
        let mut runner = RecordingRunner::new().with_response(IMPORT, ScriptedResponse::Exit(1));
        run(&config, &mut runner);

        let modes: Vec<StdioMode> = runner.calls().iter().map(|c| c.stdio).collect();
        assert_eq!(
            modes,
            vec![
                StdioMode::Captured,
                StdioMode::Captured,
                StdioMode::Inherited,
                StdioMode::Inherited
            ]
        );
    }

    #[test]
    fn process_exit_code_clamps_out_of_range_codes() {
        let mut report = LaunchReport::new();
        report.exit_code = 3;
        assert_eq!(report.process_exit_code(), 3);
        report.exit_code = -1073741819;
        assert_eq!(report.process_exit_code(), 1);
        report.exit_code = 9009;
        assert_eq!(report.process_exit_code(), 1);
    }

    #[test]
    fn chinese_messages_by_default_locale() {
        let config = LauncherConfig {
            locale: Some(Locale::ZhCn),
            ..Default::default()
        };
        let mut runner = RecordingRunner::new().with_response(VERSION, ScriptedResponse::SpawnError);
        let temp = project();
        let mut ui = MockUI::new();
        ui.set_interactive(true);
        Launcher::new(&config, temp.path()).run(&mut runner, &mut ui);
        assert_eq!(ui.pauses(), ["按任意键退出...".to_string()]);
    }

    #[test]
    fn redirected_console_asks_for_enter() {
        let config = english(LauncherConfig::default());
        let mut runner = RecordingRunner::new();
        let (_report, ui) = run(&config, &mut runner);
        assert_eq!(ui.pauses(), ["Press Enter to exit...".to_string()]);
    }

    #[test]
    fn config_failure_is_localized_and_pauses() {
        let error = LaunchError::ConfigParseError {
            path: PathBuf::from("launchkit.yml"),
            message: "unknown field `runtim`".to_string(),
        };
        let mut ui = MockUI::new();
        ui.set_interactive(true);

        let code = report_config_failure(&error, &Messages::new(Locale::ZhCn), true, &mut ui);

        assert_eq!(code, EXIT_FAILURE);
        assert!(ui.has_error("配置文件有误"));
        assert!(ui.has_error("runtim"));
        assert_eq!(ui.pauses(), ["按任意键退出...".to_string()]);
    }

    #[test]
    fn config_failure_skips_pause_when_disabled() {
        let error = LaunchError::ConfigValidationError {
            message: "runtime: must not be empty".to_string(),
        };
        let mut ui = MockUI::new();
        report_config_failure(&error, &Messages::new(Locale::En), false, &mut ui);
        assert!(ui.has_error("Configuration error"));
        assert!(ui.pauses().is_empty());
    }
}
