//! Console user interface.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for the real console
//! - [`MockUI`] for tests
//! - Spinners for the quick probes
//!
//! # Example
//!
//! ```
//! use launchkit::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.success("Found Python 3.11.4");
//! ui.pause("Press any key to exit...").unwrap();
//!
//! assert!(ui.has_success("3.11.4"));
//! assert_eq!(ui.pauses().len(), 1);
//! ```

pub mod mock;
pub mod output;
pub mod spinner;
pub mod terminal;
pub mod theme;

pub use mock::{MockSpinner, MockUI};
pub use output::OutputMode;
pub use spinner::ProgressSpinner;
pub use terminal::TerminalUI;
pub use theme::{should_use_colors, LaunchTheme};

use crate::error::Result;

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Start a spinner for an operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Show `prompt` and block until the operator acknowledges.
    ///
    /// Always shown, whatever the output mode.
    fn pause(&mut self, prompt: &str) -> Result<()>;

    /// Whether `pause` reads a single key rather than a whole line.
    fn is_interactive(&self) -> bool;
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    /// Mark the operation as successful.
    fn finish_success(&mut self, msg: &str);

    /// Mark the operation as failed.
    fn finish_error(&mut self, msg: &str);
}
