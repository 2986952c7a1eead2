//! Host environment detection.

/// Check if running in a CI environment.
///
/// Used by `main()` to skip the final acknowledgment pause, since nobody
/// is at the console to press a key. Checks `CI`, `GITHUB_ACTIONS`,
/// `GITLAB_CI`, `CIRCLECI`, `TRAVIS`, `JENKINS_URL`.
pub fn is_ci() -> bool {
    is_ci_with(|key| std::env::var(key).is_ok())
}

/// Check for a CI environment with a custom variable lookup.
pub fn is_ci_with<F>(is_set: F) -> bool
where
    F: Fn(&str) -> bool,
{
    const CI_VARS: &[&str] = &[
        "CI",
        "GITHUB_ACTIONS",
        "GITLAB_CI",
        "CIRCLECI",
        "TRAVIS",
        "JENKINS_URL",
    ];
    CI_VARS.iter().any(|key| is_set(key))
}
