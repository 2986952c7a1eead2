//! Error types for launcher operations.
//!
//! This module defines [`LaunchError`], the error type for infrastructure
//! failures (configuration, terminal IO), and a [`Result`] type alias.
//!
//! # Error Handling Strategy
//!
//! - Bootstrap step outcomes are plain enums, never errors: a missing
//!   runtime or a failed install is a result the launcher acts on
//! - Use `LaunchError` for failures that prevent the launcher itself from
//!   working (unreadable config, broken terminal)
//! - Use `anyhow::Error` (via `LaunchError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for launcher operations.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// A subprocess could not be spawned or waited on.
    #[error("Failed to run '{command}': {message}")]
    SpawnFailed { command: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for launcher operations.
pub type Result<T> = std::result::Result<T, LaunchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_not_found_displays_path() {
        let err = LaunchError::ConfigNotFound {
            path: PathBuf::from("/opt/app/launchkit.yml"),
        };
        assert!(err.to_string().contains("/opt/app/launchkit.yml"));
    }

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = LaunchError::ConfigParseError {
            path: PathBuf::from("launchkit.yml"),
            message: "invalid type: sequence".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("launchkit.yml"));
        assert!(msg.contains("invalid type: sequence"));
    }

    #[test]
    fn config_validation_error_displays_message() {
        let err = LaunchError::ConfigValidationError {
            message: "runtime must not be empty".into(),
        };
        assert!(err.to_string().contains("runtime must not be empty"));
    }

    #[test]
    fn spawn_failed_displays_command_and_message() {
        let err = LaunchError::SpawnFailed {
            command: "python --version".into(),
            message: "No such file or directory".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("python --version"));
        assert!(msg.contains("No such file or directory"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: LaunchError = io_err.into();
        assert!(matches!(err, LaunchError::Io(_)));
    }

    #[test]
    fn anyhow_error_converts_transparently() {
        let err: LaunchError = anyhow::anyhow!("terminal went away").into();
        assert_eq!(err.to_string(), "terminal went away");
    }
}
