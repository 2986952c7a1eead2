//! Bootstrap sequence execution.
//!
//! - [`workflow`] - The staged launcher and its report
//! - [`launch`] - Running the application's entry point

pub mod launch;
pub mod workflow;

pub use launch::{launch_entry_point, LaunchOutcome};
pub use workflow::{
    await_acknowledgment, report_config_failure, LaunchReport, Launcher, Stage, EXIT_FAILURE,
};
