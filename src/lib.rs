//! Launchkit - Bootstrap launcher for a Python desktop application.
//!
//! Launchkit checks that a Python interpreter is available, installs the
//! application's dependencies when the required module cannot be imported,
//! runs the entry point in the foreground, and waits for the operator to
//! acknowledge the result before the console closes.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, parsing, and validation
//! - [`error`] - Error types and result aliases
//! - [`messages`] - Localized operator-facing text
//! - [`requirements`] - Runtime and dependency probes, dependency installation
//! - [`runner`] - The staged bootstrap sequence
//! - [`shell`] - Process execution
//! - [`ui`] - Spinners, status lines, and the exit pause
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use launchkit::config::LauncherConfig;
//! use launchkit::runner::{Launcher, Stage};
//! use launchkit::shell::RecordingRunner;
//! use launchkit::ui::MockUI;
//!
//! let config = LauncherConfig::default();
//! let mut runner = RecordingRunner::new();
//! let mut ui = MockUI::new();
//!
//! let report = Launcher::new(&config, Path::new(".")).run(&mut runner, &mut ui);
//! assert_eq!(report.exit_code, 0);
//! assert!(!report.visited(Stage::InstallDependencies));
//! assert_eq!(runner.commands().len(), 3);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod messages;
pub mod requirements;
pub mod runner;
pub mod shell;
pub mod ui;

pub use error::{LaunchError, Result};
