//! Azure DevOps project URL parsing.

use crate::error::{Error, Result};

const USAGE: &str = "expected https://dev.azure.com/{organization}/{project} \
     or https://{organization}.visualstudio.com/{project}";

/// Extract `(organization, project)` from a project URL.
///
/// Accepts both current and legacy URL shapes:
/// `https://dev.azure.com/{org}/{project}` and
/// `https://{org}.visualstudio.com/{project}`. Extra path segments are
/// ignored; plain `http://` is accepted.
pub fn parse_project_url(url: &str) -> Result<(String, String)> {
    let trimmed = url.trim();
    let rest = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .ok_or_else(|| invalid(url))?;

    let mut segments = rest.split('/').filter(|s| !s.is_empty());
    let host = segments.next().ok_or_else(|| invalid(url))?;

    if host == "dev.azure.com" {
        if let (Some(org), Some(project)) = (segments.next(), segments.next()) {
            return Ok((org.to_string(), project.to_string()));
        }
    } else if let Some(org) = host.strip_suffix(".visualstudio.com") {
        if !org.is_empty() && !org.contains('.') {
            if let Some(project) = segments.next() {
                return Ok((org.to_string(), project.to_string()));
            }
        }
    }

    Err(invalid(url))
}

fn invalid(url: &str) -> Error {
    Error::InvalidArgument(format!("invalid Azure DevOps URL '{url}': {USAGE}"))
}
