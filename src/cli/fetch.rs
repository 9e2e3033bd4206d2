//! Remote mode: fetch an Azure DevOps variable group and write it as .env.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use dialoguer::Input;
use tracing::debug;

use crate::cli::output;
use crate::cli::PolicyArgs;
use crate::core::azure::{self, auth, url, Client};
use crate::core::settings::Settings;
use crate::core::writer;
use crate::error::{Error, Result};

pub struct FetchArgs {
    pub url: Option<String>,
    pub org: Option<String>,
    pub project: Option<String>,
    pub group: Option<String>,
    pub output: PathBuf,
    pub include_disabled: bool,
    pub policy: PolicyArgs,
}

/// Fetch a variable group and write it to the output file.
pub fn execute(args: FetchArgs) -> Result<()> {
    let settings = Settings::from_env();

    let (organization, project) =
        resolve_org_project(args.url, args.org, args.project, &settings)?;
    let group_name = args
        .group
        .or_else(|| settings.default_group.clone())
        .ok_or_else(|| Error::InvalidArgument("variable group name is required".to_string()))?;

    debug!(
        organization = %organization,
        project = %project,
        group = %group_name,
        "fetching variable group"
    );

    let token = auth::acquire_token(&auth::AzureCli)?;
    let client = Client::new(&organization, &project)?;
    let group = client.find_group(&token, &group_name)?;

    let mut vars = azure::flatten(group, args.include_disabled);
    let report = writer::write(
        &args.output,
        &mut vars,
        &args.policy.policy(),
        args.policy.overwrite,
        &args.policy.preserve_set(),
    )?;

    if let Some(backup) = &report.backup {
        output::hint(&format!("existing file backed up to {}", backup.display()));
    }
    output::success(&format!(
        "wrote {} variables from '{}' to '{}'",
        report.written,
        group_name,
        args.output.display()
    ));

    Ok(())
}

/// Resolve organization and project from flags, environment defaults, or
/// an interactive URL prompt, in that order.
fn resolve_org_project(
    url_flag: Option<String>,
    org_flag: Option<String>,
    project_flag: Option<String>,
    settings: &Settings,
) -> Result<(String, String)> {
    if let Some(project_url) = url_flag {
        return url::parse_project_url(&project_url);
    }

    let organization = org_flag.or_else(|| settings.organization.clone());
    let project = project_flag.or_else(|| settings.project.clone());
    if let (Some(organization), Some(project)) = (organization, project) {
        return Ok((organization, project));
    }

    if let Some(project_url) = &settings.url {
        return url::parse_project_url(project_url);
    }

    if io::stdin().is_terminal() {
        let project_url: String = Input::new()
            .with_prompt("Azure DevOps project URL (e.g. https://dev.azure.com/org/project)")
            .interact_text()?;
        return url::parse_project_url(&project_url);
    }

    Err(Error::InvalidArgument(
        "organization and project are required (pass --url or --org and --project)".to_string(),
    ))
}
