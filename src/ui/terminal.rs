//! Console UI.

use anyhow::Context;
use console::Term;
use std::io::{BufRead, Write};

use crate::error::Result;

use super::spinner::LineSpinner;
use super::{LaunchTheme, OutputMode, ProgressSpinner, SpinnerHandle, UserInterface};

/// Console UI implementation.
///
/// Status lines go to stdout, warnings and errors to stderr, so a launcher
/// whose output is redirected still reports problems on the console.
pub struct TerminalUI {
    term: Term,
    err_term: Term,
    theme: LaunchTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI.
    ///
    /// With `allow_colors` false every line is written unstyled.
    pub fn new(mode: OutputMode, allow_colors: bool) -> Self {
        Self {
            term: Term::stdout(),
            err_term: Term::stderr(),
            theme: LaunchTheme::for_terminal(allow_colors),
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", msg).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        writeln!(self.err_term, "{}", self.theme.format_warning(msg)).ok();
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err_term, "{}", self.theme.format_error(msg)).ok();
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if !self.mode.shows_spinners() {
            Box::new(ProgressSpinner::hidden())
        } else if self.term.is_term() {
            Box::new(ProgressSpinner::new(message, self.theme.clone()))
        } else {
            Box::new(LineSpinner::new(self.term.clone(), self.theme.clone()))
        }
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}\n", self.theme.format_header(title)).ok();
        }
    }

    fn pause(&mut self, prompt: &str) -> Result<()> {
        write!(self.term, "\n{} ", self.theme.dim.apply_to(prompt))?;
        self.term.flush()?;

        if self.is_interactive() {
            self.term
                .read_key()
                .context("Failed to read the acknowledgment key")?;
            writeln!(self.term)?;
        } else {
            // Redirected output: the prompt asks for Enter, so a line (or EOF) acknowledges.
            let mut line = String::new();
            std::io::stdin()
                .lock()
                .read_line(&mut line)
                .context("Failed to read the acknowledgment line")?;
        }
        Ok(())
    }

    fn is_interactive(&self) -> bool {
        self.term.is_term()
    }
}
