//! Subprocess execution and host environment detection.

pub mod command;
pub mod mock;
pub mod platform;

pub use command::{CommandResult, Invocation, ProcessRunner, StdioMode, SystemRunner};
pub use mock::{RecordedCall, RecordingRunner, ScriptedResponse};
pub use platform::is_ci;
