//! Runtime and dependency probes.
//!
//! Both probes ask the runtime itself: `<runtime> --version` for presence
//! and `<runtime> -c "import <module>"` for the dependency. Output is
//! captured so the operator never sees it; only the exit status decides.
//!
//! The dependency probe imports exactly one representative module. It is a
//! stand-in for "the whole manifest is installed", not a per-package check.

use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::LazyLock;
use tracing::{debug, warn};

use crate::config::LauncherConfig;
use crate::shell::{Invocation, ProcessRunner, StdioMode};

use super::status::{CheckResult, RuntimeStatus};

static VERSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\.(\d+)(?:\.(\d+))?").unwrap());

/// A `major.minor[.patch]` runtime version.
///
/// A missing patch compares equal to any patch, so `3.7` as a minimum is
/// satisfied by `3.7.0` and `3.7.9` alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: Option<u32>,
}

impl RuntimeVersion {
    pub fn new(major: u32, minor: u32, patch: Option<u32>) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Whether this version is at least `minimum`.
    pub fn satisfies(&self, minimum: &RuntimeVersion) -> bool {
        self.compare(minimum) != Ordering::Less
    }

    fn compare(&self, other: &RuntimeVersion) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(match (self.patch, other.patch) {
                (Some(a), Some(b)) => a.cmp(&b),
                _ => Ordering::Equal,
            })
    }
}

impl fmt::Display for RuntimeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.patch {
            Some(patch) => write!(f, "{}.{}.{}", self.major, self.minor, patch),
            None => write!(f, "{}.{}", self.major, self.minor),
        }
    }
}

impl FromStr for RuntimeVersion {
    type Err = String;

    /// Parse a bare version such as `3.7` or `3.11.4`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let caps = VERSION_REGEX
            .captures(trimmed)
            .filter(|c| c.get(0).is_some_and(|m| m.as_str() == trimmed))
            .ok_or_else(|| format!("invalid version '{}', expected e.g. 3.7 or 3.11.4", s))?;

        let number = |i: usize| -> Result<Option<u32>, String> {
            caps.get(i)
                .map(|m| {
                    m.as_str()
                        .parse::<u32>()
                        .map_err(|e| format!("invalid version '{}': {}", s, e))
                })
                .transpose()
        };

        Ok(Self {
            major: number(1)?.unwrap_or_default(),
            minor: number(2)?.unwrap_or_default(),
            patch: number(3)?,
        })
    }
}

/// Pull the first version number out of a `--version` banner.
///
/// `Python 3.11.4` yields `3.11.4`. Returns `None` when nothing looks like
/// a version.
pub fn parse_version_output(output: &str) -> Option<RuntimeVersion> {
    let caps = VERSION_REGEX.captures(output)?;
    let number = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());
    Some(RuntimeVersion {
        major: number(1)?,
        minor: number(2)?,
        patch: number(3),
    })
}

/// Build the runtime presence probe.
pub fn runtime_probe(config: &LauncherConfig, project_root: &Path) -> Invocation {
    Invocation::new(&config.runtime)
        .arg("--version")
        .current_dir(project_root)
}

/// Build the dependency import probe.
pub fn module_probe(config: &LauncherConfig, project_root: &Path) -> Invocation {
    Invocation::new(&config.runtime)
        .arg("-c")
        .arg(format!("import {}", config.required_module))
        .current_dir(project_root)
}

/// Check that the runtime can be started.
///
/// A spawn failure and a non-zero exit both count as absent.
pub fn probe_runtime(
    config: &LauncherConfig,
    project_root: &Path,
    runner: &mut dyn ProcessRunner,
) -> RuntimeStatus {
    let invocation = runtime_probe(config, project_root);
    match runner.run(&invocation, StdioMode::Captured) {
        Ok(result) if result.success => {
            // Python 2 prints its banner on stderr.
            let version = parse_version_output(&result.combined_output());
            debug!("Runtime '{}' present, version {:?}", config.runtime, version);
            RuntimeStatus::Present { version }
        }
        Ok(result) => {
            warn!(
                "Runtime probe '{}' exited with {:?}",
                invocation, result.exit_code
            );
            RuntimeStatus::Absent
        }
        Err(e) => {
            warn!("Runtime probe failed: {}", e);
            RuntimeStatus::Absent
        }
    }
}

/// Check that the required module imports.
pub fn probe_module(
    config: &LauncherConfig,
    project_root: &Path,
    runner: &mut dyn ProcessRunner,
) -> CheckResult {
    let invocation = module_probe(config, project_root);
    match runner.run(&invocation, StdioMode::Captured) {
        Ok(result) => {
            debug!(
                "Import probe for '{}' exited with {:?}",
                config.required_module, result.exit_code
            );
            CheckResult::from(result.success)
        }
        Err(e) => {
            warn!("Import probe failed: {}", e);
            CheckResult::Absent
        }
    }
}
