//! Launcher configuration.
//!
//! - Schema and defaults in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use launchkit::config::load_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join("launchkit.yml"), "runtime: python3").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! assert_eq!(config.runtime, "python3");
//! assert_eq!(config.required_module, "PyQt5");
//! ```
//!
//! # Precedence
//!
//! 1. Built-in defaults
//! 2. `launchkit.yml` in the project root, or an explicit `--config` file
//! 3. Command-line flags and their environment variables

pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::{find_config_file, load_config, load_config_file, parse_config, CONFIG_FILE_NAME};
pub use schema::LauncherConfig;
pub use validator::{validate, validate_config, ValidationError};
