//! Configuration validation.

use crate::error::{LaunchError, Result};
use crate::requirements::RuntimeVersion;

use super::schema::LauncherConfig;

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Field that failed.
    pub field: &'static str,
    /// What is wrong with it.
    pub message: String,
}

/// Collect every problem in `config`.
pub fn validate_config(config: &LauncherConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let mut require_non_empty = |field: &'static str, value: &str| {
        if value.trim().is_empty() {
            errors.push(ValidationError {
                field,
                message: "must not be empty".to_string(),
            });
        }
    };

    require_non_empty("runtime", &config.runtime);
    require_non_empty("required_module", &config.required_module);
    require_non_empty("manifest", &config.manifest.to_string_lossy());
    require_non_empty("entry_point", &config.entry_point.to_string_lossy());

    if config.required_module.contains(char::is_whitespace) {
        errors.push(ValidationError {
            field: "required_module",
            message: format!("'{}' is not a module name", config.required_module),
        });
    }

    if let Err(message) = config.min_runtime_version.parse::<RuntimeVersion>() {
        errors.push(ValidationError {
            field: "min_runtime_version",
            message,
        });
    }

    errors
}

/// Validate `config`, folding all problems into one error.
pub fn validate(config: &LauncherConfig) -> Result<()> {
    let errors = validate_config(config);
    if errors.is_empty() {
        return Ok(());
    }

    let message = errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ");
    Err(LaunchError::ConfigValidationError { message })
}
