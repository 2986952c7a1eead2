//! Launcher configuration schema.
//!
//! Every field has a default, so an absent or empty `launchkit.yml` gives
//! the stock setup: `python`, probing `PyQt5`, installing from
//! `requirements.txt`, running `main.py`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::messages::Locale;

/// Explicit launcher configuration.
///
/// Relative `manifest` and `entry_point` paths resolve against the project
/// root, which is the launcher's working directory unless overridden.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LauncherConfig {
    /// Runtime executable, looked up on PATH unless it is a path.
    pub runtime: String,

    /// The one module whose import stands in for the whole dependency set.
    pub required_module: String,

    /// Dependency manifest handed to pip.
    pub manifest: PathBuf,

    /// Script that starts the application.
    pub entry_point: PathBuf,

    /// Lowest runtime version the operator is told to install.
    pub min_runtime_version: String,

    /// Display language. Detected from the environment when unset.
    pub locale: Option<Locale>,

    /// Wait for a key press before exiting.
    pub pause_on_exit: bool,

    /// Refuse to launch after a failed install and propagate the
    /// application's exit code.
    pub strict: bool,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            runtime: "python".to_string(),
            required_module: "PyQt5".to_string(),
            manifest: PathBuf::from("requirements.txt"),
            entry_point: PathBuf::from("main.py"),
            min_runtime_version: "3.7".to_string(),
            locale: None,
            pause_on_exit: true,
            strict: false,
        }
    }
}

impl LauncherConfig {
    /// Absolute location of the manifest for `project_root`.
    pub fn manifest_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.manifest)
    }

    /// Absolute location of the entry point for `project_root`.
    pub fn entry_point_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.entry_point)
    }

    /// The configured locale, or one detected from the environment.
    pub fn resolved_locale(&self) -> Locale {
        self.locale.unwrap_or_else(Locale::detect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_layout() {
        let config = LauncherConfig::default();
        assert_eq!(config.runtime, "python");
        assert_eq!(config.required_module, "PyQt5");
        assert_eq!(config.manifest, PathBuf::from("requirements.txt"));
        assert_eq!(config.entry_point, PathBuf::from("main.py"));
        assert!(config.pause_on_exit);
        assert!(!config.strict);
    }

    #[test]
    fn relative_paths_resolve_against_root() {
        let config = LauncherConfig::default();
        let root = Path::new("/srv/app");
        assert_eq!(
            config.manifest_path(root),
            PathBuf::from("/srv/app/requirements.txt")
        );
        assert_eq!(
            config.entry_point_path(root),
            PathBuf::from("/srv/app/main.py")
        );
    }

    #[test]
    fn absolute_paths_are_kept() {
        let config = LauncherConfig {
            manifest: PathBuf::from("/etc/app/requirements.txt"),
            ..Default::default()
        };
        assert_eq!(
            config.manifest_path(Path::new("/srv/app")),
            PathBuf::from("/etc/app/requirements.txt")
        );
    }

    #[test]
    fn explicit_locale_wins() {
        let config = LauncherConfig {
            locale: Some(Locale::En),
            ..Default::default()
        };
        assert_eq!(config.resolved_locale(), Locale::En);
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let config: LauncherConfig =
            serde_yaml::from_str("runtime: python3\nstrict: true\n").unwrap();
        assert_eq!(config.runtime, "python3");
        assert!(config.strict);
        assert_eq!(config.required_module, "PyQt5");
    }

    #[test]
    fn locale_accepts_underscore_spelling() {
        let config: LauncherConfig = serde_yaml::from_str("locale: zh_CN\n").unwrap();
        assert_eq!(config.locale, Some(Locale::ZhCn));
        let config: LauncherConfig = serde_yaml::from_str("locale: EN\n").unwrap();
        assert_eq!(config.locale, Some(Locale::En));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result: Result<LauncherConfig, _> = serde_yaml::from_str("runtim: python3\n");
        assert!(result.is_err());
    }
}
