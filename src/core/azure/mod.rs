//! Azure DevOps variable-group client.
//!
//! One authenticated GET against the `distributedtask/variablegroups`
//! endpoint per invocation. Groups are fetched fresh every time; nothing
//! is cached or persisted.

pub mod auth;
pub mod url;

use std::time::Duration;

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::debug;

use crate::core::env::Vars;
use crate::error::{Error, Result};

/// Production endpoint host.
pub const DEFAULT_BASE_URL: &str = "https://dev.azure.com";

const API_VERSION: &str = "6.0-preview.2";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One entry inside a variable group.
#[derive(Debug, Clone, Deserialize)]
pub struct Variable {
    #[serde(default)]
    pub value: String,
    #[serde(rename = "isSecret", default)]
    pub is_secret: bool,
    /// The API omits this field for ordinary enabled variables.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// A named bundle of variables, as returned by the list endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableGroup {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub variables: IndexMap<String, Variable>,
    #[serde(rename = "type", default)]
    pub group_type: String,
    #[serde(default)]
    pub is_shared: bool,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Deserialize)]
struct GroupListResponse {
    value: Vec<VariableGroup>,
}

/// Single-shot client for one organization/project.
pub struct Client {
    organization: String,
    project: String,
    base_url: String,
    agent: ureq::Agent,
}

impl Client {
    /// Create a client against the production endpoint.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if organization or project is empty
    /// after trimming.
    pub fn new(organization: &str, project: &str) -> Result<Self> {
        Self::with_base_url(organization, project, DEFAULT_BASE_URL)
    }

    /// Create a client against an alternate host (used by tests).
    pub fn with_base_url(organization: &str, project: &str, base_url: &str) -> Result<Self> {
        let organization = organization.trim();
        if organization.is_empty() {
            return Err(Error::InvalidArgument(
                "organization name is required".to_string(),
            ));
        }
        let project = project.trim();
        if project.is_empty() {
            return Err(Error::InvalidArgument(
                "project name is required".to_string(),
            ));
        }

        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(REQUEST_TIMEOUT))
            .http_status_as_error(false)
            .user_agent(concat!("dotenvify/", env!("CARGO_PKG_VERSION")))
            .build()
            .into();

        Ok(Self {
            organization: organization.to_string(),
            project: project.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            agent,
        })
    }

    /// List every variable group in the project.
    pub fn list_groups(&self, token: &str) -> Result<Vec<VariableGroup>> {
        let url = format!(
            "{}/{}/{}/_apis/distributedtask/variablegroups?api-version={}",
            self.base_url, self.organization, self.project, API_VERSION
        );
        debug!(url = %url, "listing variable groups");

        let mut response = self
            .agent
            .get(&url)
            .header("Authorization", format!("Bearer {token}"))
            .call()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.body_mut().read_to_string().unwrap_or_default();
            return Err(Error::RemoteRequestFailed {
                status: status.as_u16(),
                body,
            });
        }

        let list: GroupListResponse = response.body_mut().read_json()?;
        debug!(count = list.value.len(), "variable groups listed");
        Ok(list.value)
    }

    /// Find a variable group by exact name.
    ///
    /// # Errors
    ///
    /// `GroupNotFound` when no group matches; `AmbiguousGroupName` when
    /// more than one does (the API gives no ordering guarantee worth
    /// tie-breaking on).
    pub fn find_group(&self, token: &str, name: &str) -> Result<VariableGroup> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidArgument(
                "variable group name is required".to_string(),
            ));
        }

        let groups = self.list_groups(token)?;
        let mut matches: Vec<VariableGroup> =
            groups.into_iter().filter(|g| g.name == name).collect();

        match matches.len() {
            0 => Err(Error::GroupNotFound(name.to_string())),
            1 => Ok(matches.remove(0)),
            count => Err(Error::AmbiguousGroupName {
                name: name.to_string(),
                count,
            }),
        }
    }
}

/// Project a group's variables down to plain name/value pairs.
///
/// Secret/enabled metadata is dropped. Unless `include_disabled` is set,
/// entries disabled in the remote store are skipped so they stay out of
/// the written file.
pub fn flatten(group: VariableGroup, include_disabled: bool) -> Vars {
    group
        .variables
        .into_iter()
        .filter(|(_, variable)| include_disabled || variable.enabled)
        .map(|(name, variable)| (name, variable.value))
        .collect()
}
