//! Bulk dependency installation from the manifest.
//!
//! Runs `<runtime> -m pip install -r <manifest>` with the console attached
//! so the operator sees pip's progress. The call blocks until pip exits.
//!
//! Every way this can go wrong is reported as a distinct
//! [`InstallOutcome`]. Whether a bad outcome stops the launch is the
//! caller's decision, not this module's.

use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::LauncherConfig;
use crate::shell::{Invocation, ProcessRunner, StdioMode};

/// Result of the installation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The package manager exited 0.
    Succeeded,
    /// The package manager ran and exited non-zero.
    Failed { exit_code: Option<i32> },
    /// The manifest was not on disk when installation started.
    ManifestMissing { path: PathBuf },
    /// The package manager could not be started.
    SpawnFailed { message: String },
}

impl InstallOutcome {
    /// Whether the dependency set is believed to be installed.
    pub fn is_success(&self) -> bool {
        matches!(self, InstallOutcome::Succeeded)
    }
}

/// Build the installer invocation.
pub fn install_command(config: &LauncherConfig, project_root: &Path) -> Invocation {
    Invocation::new(&config.runtime)
        .args(["-m", "pip", "install", "-r"])
        .arg(config.manifest.to_string_lossy())
        .current_dir(project_root)
}

/// Install the dependency set declared in the manifest.
///
/// In lenient mode a missing manifest is reported but pip is still run, so
/// pip's own error is what the operator sees. In strict mode a missing
/// manifest returns before anything is spawned.
pub fn install_dependencies(
    config: &LauncherConfig,
    project_root: &Path,
    runner: &mut dyn ProcessRunner,
) -> InstallOutcome {
    let manifest = config.manifest_path(project_root);
    let manifest_present = manifest.is_file();

    if !manifest_present {
        warn!("Dependency manifest not found at {}", manifest.display());
        if config.strict {
            return InstallOutcome::ManifestMissing { path: manifest };
        }
    }

    let invocation = install_command(config, project_root);
    info!("Installing dependencies: {}", invocation);

    let outcome = match runner.run(&invocation, StdioMode::Inherited) {
        Ok(result) if result.success => InstallOutcome::Succeeded,
        Ok(result) => InstallOutcome::Failed {
            exit_code: result.exit_code,
        },
        Err(e) => InstallOutcome::SpawnFailed {
            message: e.to_string(),
        },
    };

    if manifest_present {
        outcome
    } else {
        InstallOutcome::ManifestMissing { path: manifest }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::{RecordingRunner, ScriptedResponse};
    use std::fs;
    use tempfile::TempDir;

    fn project_with_manifest() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("requirements.txt"), "PyQt5>=5.15\nnumpy\n").unwrap();
        temp
    }

    #[test]
    fn install_command_targets_manifest() {
        let config = LauncherConfig::default();
        let inv = install_command(&config, Path::new("/srv/app"));
        assert_eq!(
            inv.to_string(),
            "python -m pip install -r requirements.txt"
        );
    }

    #[test]
    fn successful_install() {
        let temp = project_with_manifest();
        let mut runner = RecordingRunner::new();
        let outcome = install_dependencies(&LauncherConfig::default(), temp.path(), &mut runner);
        assert_eq!(outcome, InstallOutcome::Succeeded);
        assert!(outcome.is_success());
        assert_eq!(runner.calls()[0].stdio, StdioMode::Inherited);
    }

    #[test]
    fn failed_install_keeps_exit_code() {
        let temp = project_with_manifest();
        let mut runner = RecordingRunner::new().with_response("pip", ScriptedResponse::Exit(1));
        let outcome = install_dependencies(&LauncherConfig::default(), temp.path(), &mut runner);
        assert_eq!(outcome, InstallOutcome::Failed { exit_code: Some(1) });
        assert!(!outcome.is_success());
    }

    #[test]
    fn spawn_failure_is_reported() {
        let temp = project_with_manifest();
        let mut runner =
            RecordingRunner::new().with_response("pip", ScriptedResponse::SpawnError);
        let outcome = install_dependencies(&LauncherConfig::default(), temp.path(), &mut runner);
        assert!(matches!(outcome, InstallOutcome::SpawnFailed { .. }));
    }

    #[test]
    fn missing_manifest_still_runs_installer_when_lenient() {
        let temp = TempDir::new().unwrap();
        let mut runner = RecordingRunner::new().with_response("pip", ScriptedResponse::Exit(1));
        let outcome = install_dependencies(&LauncherConfig::default(), temp.path(), &mut runner);

        assert_eq!(
            outcome,
            InstallOutcome::ManifestMissing {
                path: temp.path().join("requirements.txt")
            }
        );
        assert_eq!(runner.count_matching("pip install"), 1);
    }

    #[test]
    fn missing_manifest_skips_installer_when_strict() {
        let temp = TempDir::new().unwrap();
        let config = LauncherConfig {
            strict: true,
            ..Default::default()
        };
        let mut runner = RecordingRunner::new();
        let outcome = install_dependencies(&config, temp.path(), &mut runner);

        assert!(matches!(outcome, InstallOutcome::ManifestMissing { .. }));
        assert!(runner.calls().is_empty());
    }
}
