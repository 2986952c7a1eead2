//! Scripted process runner for testing.
//!
//! `RecordingRunner` implements [`ProcessRunner`] without spawning anything.
//! Each call is matched against scripted rules and recorded so tests can
//! assert which subprocesses ran, in which order, and with which stdio.
//!
//! # Example
//!
//! ```
//! use launchkit::shell::{Invocation, ProcessRunner, RecordingRunner, ScriptedResponse, StdioMode};
//!
//! let mut runner = RecordingRunner::new();
//! runner.respond("import PyQt5", ScriptedResponse::Exit(1));
//!
//! let probe = Invocation::new("python").args(["-c", "import PyQt5"]);
//! let result = runner.run(&probe, StdioMode::Captured).unwrap();
//!
//! assert!(!result.success);
//! assert_eq!(runner.commands(), vec!["python -c \"import PyQt5\"".to_string()]);
//! ```

use crate::error::{LaunchError, Result};

use super::command::{CommandResult, Invocation, ProcessRunner, StdioMode};

/// What a scripted subprocess does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedResponse {
    /// Exit with this code and no output.
    Exit(i32),
    /// Exit with this code and the given captured output.
    Output {
        code: i32,
        stdout: String,
        stderr: String,
    },
    /// Fail to spawn, as when the program is not on PATH.
    SpawnError,
}

/// One recorded call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// The invocation rendered as a command line.
    pub command: String,
    /// The stdio wiring requested for it.
    pub stdio: StdioMode,
}

/// Process runner that records calls and replays scripted responses.
///
/// Rules are checked in insertion order; the first rule whose pattern is a
/// substring of the rendered command line wins. Unmatched calls exit 0.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    rules: Vec<(String, ScriptedResponse)>,
    calls: Vec<RecordedCall>,
}

impl RecordingRunner {
    /// Create a runner where every command succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the response for commands containing `pattern`.
    pub fn respond(&mut self, pattern: &str, response: ScriptedResponse) {
        self.rules.push((pattern.to_string(), response));
    }

    /// Builder form of [`respond`](Self::respond).
    pub fn with_response(mut self, pattern: &str, response: ScriptedResponse) -> Self {
        self.respond(pattern, response);
        self
    }

    /// All recorded calls, in order.
    pub fn calls(&self) -> &[RecordedCall] {
        &self.calls
    }

    /// Rendered command lines of all recorded calls, in order.
    pub fn commands(&self) -> Vec<String> {
        self.calls.iter().map(|c| c.command.clone()).collect()
    }

    /// Number of recorded calls whose command line contains `pattern`.
    pub fn count_matching(&self, pattern: &str) -> usize {
        self.calls
            .iter()
            .filter(|c| c.command.contains(pattern))
            .count()
    }

    /// Index of the first recorded call containing `pattern`.
    pub fn position_of(&self, pattern: &str) -> Option<usize> {
        self.calls.iter().position(|c| c.command.contains(pattern))
    }
}

impl ProcessRunner for RecordingRunner {
    fn run(&mut self, invocation: &Invocation, stdio: StdioMode) -> Result<CommandResult> {
        let command = invocation.to_string();
        self.calls.push(RecordedCall {
            command: command.clone(),
            stdio,
        });

        let response = self
            .rules
            .iter()
            .find(|(pattern, _)| command.contains(pattern.as_str()))
            .map(|(_, response)| response.clone())
            .unwrap_or(ScriptedResponse::Exit(0));

        match response {
            ScriptedResponse::Exit(code) => Ok(CommandResult::from_exit_code(
                Some(code),
                String::new(),
                String::new(),
            )),
            ScriptedResponse::Output {
                code,
                stdout,
                stderr,
            } => Ok(CommandResult::from_exit_code(Some(code), stdout, stderr)),
            ScriptedResponse::SpawnError => Err(LaunchError::SpawnFailed {
                command,
                message: "program not found".to_string(),
            }),
        }
    }
}
