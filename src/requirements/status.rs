//! Probe result types.
//!
//! A probe answers one yes/no question about the host. The answer only
//! lives long enough to pick the next bootstrap stage.

use super::probe::RuntimeVersion;

/// Outcome of a presence probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckResult {
    /// The probed thing is available.
    Present,
    /// The probed thing is missing (or the probe could not run).
    Absent,
}

impl CheckResult {
    /// Whether the probe found what it looked for.
    pub fn is_present(&self) -> bool {
        matches!(self, CheckResult::Present)
    }
}

impl From<bool> for CheckResult {
    fn from(present: bool) -> Self {
        if present {
            CheckResult::Present
        } else {
            CheckResult::Absent
        }
    }
}

/// Outcome of the runtime probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeStatus {
    /// The runtime answered its version query.
    Present {
        /// Version parsed from the runtime's output, when it printed one.
        version: Option<RuntimeVersion>,
    },
    /// The runtime could not be started or reported failure.
    Absent,
}

impl RuntimeStatus {
    /// The detected version, if the runtime is present and printed one.
    pub fn version(&self) -> Option<RuntimeVersion> {
        match self {
            RuntimeStatus::Present { version } => *version,
            RuntimeStatus::Absent => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_result_from_bool() {
        assert_eq!(CheckResult::from(true), CheckResult::Present);
        assert_eq!(CheckResult::from(false), CheckResult::Absent);
        assert!(CheckResult::Present.is_present());
        assert!(!CheckResult::Absent.is_present());
    }

    #[test]
    fn runtime_present_without_version_is_still_present() {
        let status = RuntimeStatus::Present { version: None };
        assert!(status.version().is_none());
    }

    #[test]
    fn runtime_absent_has_no_version() {
        assert!(RuntimeStatus::Absent.version().is_none());
    }

    #[test]
    fn runtime_present_exposes_version() {
        let version = RuntimeVersion::new(3, 11, Some(4));
        let status = RuntimeStatus::Present {
            version: Some(version),
        };
        assert_eq!(status.version(), Some(version));
    }
}
