//! Progress spinners.

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::time::Duration;

use super::theme::LaunchTheme;
use super::SpinnerHandle;

/// A spinner shown while a probe subprocess runs.
pub struct ProgressSpinner {
    bar: ProgressBar,
    theme: LaunchTheme,
}

impl ProgressSpinner {
    /// Create a new spinner with a message.
    pub fn new(message: &str, theme: LaunchTheme) -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.magenta} {msg}")
        {
            bar.set_style(style);
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));

        Self { bar, theme }
    }

    /// Create a spinner that doesn't show (for quiet mode).
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            theme: LaunchTheme::plain(),
        }
    }

    fn finish_with(&mut self, line: String) {
        if let Ok(style) = ProgressStyle::default_spinner().template("{msg}") {
            self.bar.set_style(style);
        }
        self.bar.finish_with_message(line);
    }
}

impl SpinnerHandle for ProgressSpinner {
    fn finish_success(&mut self, msg: &str) {
        let line = self.theme.format_success(msg);
        self.finish_with(line);
    }

    fn finish_error(&mut self, msg: &str) {
        let line = self.theme.format_error(msg);
        self.finish_with(line);
    }
}

/// Spinner stand-in for non-terminal output: prints only the final line.
///
/// Keeps probe results visible when stdout is redirected to a log file,
/// where an animated spinner would draw nothing.
pub struct LineSpinner {
    term: Term,
    theme: LaunchTheme,
}

impl LineSpinner {
    /// Create a line spinner writing to `term`.
    pub fn new(term: Term, theme: LaunchTheme) -> Self {
        Self { term, theme }
    }
}

impl SpinnerHandle for LineSpinner {
    fn finish_success(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_success(msg)).ok();
    }

    fn finish_error(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_error(msg)).ok();
    }
}
