//! Configuration file discovery and loading.

use crate::config::schema::LauncherConfig;
use crate::config::validator::validate;
use crate::error::{LaunchError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the optional config file in the project root.
pub const CONFIG_FILE_NAME: &str = "launchkit.yml";

/// Find `launchkit.yml` in the project root.
pub fn find_config_file(project_root: &Path) -> Option<PathBuf> {
    let path = project_root.join(CONFIG_FILE_NAME);
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<LauncherConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            LaunchError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            anyhow::Error::new(e)
                .context(format!("Failed to read config at {}", path.display()))
                .into()
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into a config.
///
/// An empty document (or one holding only comments) yields the defaults.
pub fn parse_config(content: &str, source_path: &Path) -> Result<LauncherConfig> {
    let has_content = content
        .lines()
        .map(str::trim)
        .any(|line| !line.is_empty() && !line.starts_with('#') && line != "---");
    if !has_content {
        return Ok(LauncherConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| LaunchError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load the configuration for a project.
///
/// An explicit path must exist. Without one, `launchkit.yml` in the
/// project root is used if present, otherwise the defaults. The result is
/// validated either way.
pub fn load_config(project_root: &Path, explicit: Option<&Path>) -> Result<LauncherConfig> {
    let path = match explicit {
        Some(path) if path.is_absolute() => Some(path.to_path_buf()),
        Some(path) => Some(project_root.join(path)),
        None => find_config_file(project_root),
    };

    let config = match path {
        Some(path) => {
            debug!("Loading config from {}", path.display());
            load_config_file(&path)?
        }
        None => {
            debug!("No config file, using defaults");
            LauncherConfig::default()
        }
    };

    validate(&config)?;
    Ok(config)
}
