//! Environment-derived defaults, resolved once at startup.
//!
//! Component logic never reads the process environment directly; the CLI
//! populates this struct and threads it through explicitly.

/// Defaults for remote mode, read from the environment.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    /// `AZURE_DEVOPS_URL`
    pub url: Option<String>,
    /// `AZURE_DEVOPS_ORG`
    pub organization: Option<String>,
    /// `AZURE_DEVOPS_PROJECT`
    pub project: Option<String>,
    /// Current directory basename, the conventional variable-group name.
    pub default_group: Option<String>,
}

impl Settings {
    /// Read defaults from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read defaults through an arbitrary lookup (testable without
    /// mutating process-global state).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            url: non_empty("AZURE_DEVOPS_URL"),
            organization: non_empty("AZURE_DEVOPS_ORG"),
            project: non_empty("AZURE_DEVOPS_PROJECT"),
            default_group: std::env::current_dir().ok().and_then(|dir| {
                dir.file_name()
                    .map(|name| name.to_string_lossy().into_owned())
            }),
        }
    }
}
