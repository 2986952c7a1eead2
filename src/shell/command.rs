//! Subprocess execution.
//!
//! Every bootstrap step is one blocking subprocess. Steps describe what to
//! run as an [`Invocation`] and hand it to a [`ProcessRunner`], which makes
//! the process layer replaceable in tests.

use crate::error::{LaunchError, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};
use tracing::debug;

/// Result of executing a subprocess.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output. Empty unless the invocation captured it.
    pub stdout: String,

    /// Standard error. Empty unless the invocation captured it.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether the process exited with code 0.
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }

    /// Build a result from an exit code, treating 0 as success.
    pub fn from_exit_code(exit_code: Option<i32>, stdout: String, stderr: String) -> Self {
        if exit_code == Some(0) {
            Self::success(stdout, stderr, Duration::ZERO)
        } else {
            Self::failure(exit_code, stdout, stderr, Duration::ZERO)
        }
    }

    /// Captured stdout and stderr joined, for callers that scan both.
    pub fn combined_output(&self) -> String {
        let mut out = self.stdout.clone();
        if !self.stderr.is_empty() {
            if !out.is_empty() && !out.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(&self.stderr);
        }
        out
    }
}

/// How a subprocess's standard streams are wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdioMode {
    /// stdout and stderr are piped and returned in the [`CommandResult`];
    /// stdin is closed. Used for probes whose output the operator never sees.
    Captured,
    /// All three streams are shared with the launcher's console.
    Inherited,
}

/// A program plus arguments, run without a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program name (looked up on PATH) or path.
    pub program: String,
    /// Arguments passed verbatim.
    pub args: Vec<String>,
    /// Working directory for the child.
    pub cwd: Option<PathBuf>,
}

impl Invocation {
    /// Start an invocation of `program` with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run the child in `dir`.
    pub fn current_dir(mut self, dir: &Path) -> Self {
        self.cwd = Some(dir.to_path_buf());
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Runs subprocesses to completion.
///
/// `Err` means the process could not be started or waited on (for example
/// the program is not on PATH). A process that starts and exits non-zero
/// is an `Ok` with `success == false`.
pub trait ProcessRunner {
    /// Run `invocation` and block until it exits.
    fn run(&mut self, invocation: &Invocation, stdio: StdioMode) -> Result<CommandResult>;
}

/// [`ProcessRunner`] backed by `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    /// Create a new system runner.
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for SystemRunner {
    fn run(&mut self, invocation: &Invocation, stdio: StdioMode) -> Result<CommandResult> {
        let start = Instant::now();
        debug!("Running: {}", invocation);

        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args);

        if let Some(cwd) = &invocation.cwd {
            cmd.current_dir(cwd);
        }

        let spawn_failed = |e: std::io::Error| LaunchError::SpawnFailed {
            command: invocation.to_string(),
            message: e.to_string(),
        };

        match stdio {
            StdioMode::Captured => {
                cmd.stdin(Stdio::null());
                let output = cmd.output().map_err(spawn_failed)?;
                let duration = start.elapsed();
                let stdout = String::from_utf8_lossy(&output.stdout).to_string();
                let stderr = String::from_utf8_lossy(&output.stderr).to_string();

                debug!(
                    "'{}' exited with {:?} after {:?}",
                    invocation,
                    output.status.code(),
                    duration
                );

                if output.status.success() {
                    Ok(CommandResult::success(stdout, stderr, duration))
                } else {
                    Ok(CommandResult::failure(
                        output.status.code(),
                        stdout,
                        stderr,
                        duration,
                    ))
                }
            }
            StdioMode::Inherited => {
                cmd.stdin(Stdio::inherit())
                    .stdout(Stdio::inherit())
                    .stderr(Stdio::inherit());
                let status = cmd.status().map_err(spawn_failed)?;
                let duration = start.elapsed();

                debug!(
                    "'{}' exited with {:?} after {:?}",
                    invocation,
                    status.code(),
                    duration
                );

                if status.success() {
                    Ok(CommandResult::success(String::new(), String::new(), duration))
                } else {
                    Ok(CommandResult::failure(
                        status.code(),
                        String::new(),
                        String::new(),
                        duration,
                    ))
                }
            }
        }
    }
}
