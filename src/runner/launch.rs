//! Entry-point invocation.

use std::path::Path;
use tracing::{info, warn};

use crate::config::LauncherConfig;
use crate::shell::{Invocation, ProcessRunner, StdioMode};

/// Result of running the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// The application ran and exited.
    Exited { exit_code: Option<i32> },
    /// The application could not be started.
    SpawnFailed { message: String },
}

impl LaunchOutcome {
    /// Whether the application ran and exited 0.
    pub fn is_success(&self) -> bool {
        matches!(self, LaunchOutcome::Exited { exit_code: Some(0) })
    }
}

/// Build the entry-point invocation.
pub fn entry_point_command(config: &LauncherConfig, project_root: &Path) -> Invocation {
    Invocation::new(&config.runtime)
        .arg(config.entry_point.to_string_lossy())
        .current_dir(project_root)
}

/// Run the application in the foreground and wait for it to exit.
///
/// The console is handed over to the child; no timeout is applied.
pub fn launch_entry_point(
    config: &LauncherConfig,
    project_root: &Path,
    runner: &mut dyn ProcessRunner,
) -> LaunchOutcome {
    let script = config.entry_point_path(project_root);
    if !script.is_file() {
        warn!("Entry point not found at {}", script.display());
    }

    let invocation = entry_point_command(config, project_root);
    info!("Launching: {}", invocation);

    match runner.run(&invocation, StdioMode::Inherited) {
        Ok(result) => {
            if !result.success {
                warn!("Application exited with {:?}", result.exit_code);
            }
            LaunchOutcome::Exited {
                exit_code: result.exit_code,
            }
        }
        Err(e) => {
            warn!("Application failed to start: {}", e);
            LaunchOutcome::SpawnFailed {
                message: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::{RecordingRunner, ScriptedResponse};

    #[test]
    fn entry_point_runs_under_runtime() {
        let inv = entry_point_command(&LauncherConfig::default(), Path::new("/srv/app"));
        assert_eq!(inv.to_string(), "python main.py");
        assert_eq!(inv.cwd.as_deref(), Some(Path::new("/srv/app")));
    }

    #[test]
    fn launch_inherits_console() {
        let mut runner = RecordingRunner::new();
        let outcome = launch_entry_point(&LauncherConfig::default(), Path::new("."), &mut runner);
        assert!(outcome.is_success());
        assert_eq!(runner.calls()[0].stdio, StdioMode::Inherited);
    }

    #[test]
    fn crash_is_reported_with_exit_code() {
        let mut runner = RecordingRunner::new().with_response("main.py", ScriptedResponse::Exit(1));
        let outcome = launch_entry_point(&LauncherConfig::default(), Path::new("."), &mut runner);
        assert_eq!(outcome, LaunchOutcome::Exited { exit_code: Some(1) });
        assert!(!outcome.is_success());
    }

    #[test]
    fn spawn_failure_is_reported() {
        let mut runner =
            RecordingRunner::new().with_response("main.py", ScriptedResponse::SpawnError);
        let outcome = launch_entry_point(&LauncherConfig::default(), Path::new("."), &mut runner);
        assert!(matches!(outcome, LaunchOutcome::SpawnFailed { .. }));
    }
}
