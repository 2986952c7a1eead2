//! Runtime and dependency checks, and dependency installation.
//!
//! # Modules
//!
//! - [`probe`] - Runtime presence and module import probes
//! - [`status`] - Probe result types
//! - [`installer`] - Manifest-driven dependency installation

pub mod installer;
pub mod probe;
pub mod status;

pub use installer::{install_dependencies, InstallOutcome};
pub use probe::{parse_version_output, probe_module, probe_runtime, RuntimeVersion};
pub use status::{CheckResult, RuntimeStatus};
