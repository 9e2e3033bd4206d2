//! Access-token acquisition via the Azure CLI.
//!
//! Authentication is delegated entirely to the `az` binary: it owns the
//! interactive login and token lifetimes. This module only checks that
//! the binary exists, that a session is active, and asks it for one
//! short-lived bearer token per invocation. No retries, no refresh.

use std::process::{Command, Stdio};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Fixed Azure DevOps resource id understood by `az account get-access-token`.
const AZURE_DEVOPS_RESOURCE: &str = "499b84ac-1321-427f-aa17-267ca6975798";

/// Seam over the external credential helper, so the fetcher can be
/// exercised without spawning subprocesses.
pub trait CredentialHelper {
    /// The helper binary is resolvable on PATH.
    fn is_available(&self) -> bool;
    /// An authenticated session already exists.
    fn has_session(&self) -> Result<bool>;
    /// Issue one bearer token for the Azure DevOps resource.
    fn issue_token(&self) -> Result<String>;
}

/// The real helper: the `az` command-line tool.
pub struct AzureCli;

impl CredentialHelper for AzureCli {
    fn is_available(&self) -> bool {
        which::which("az").is_ok()
    }

    fn has_session(&self) -> Result<bool> {
        let status = Command::new("az")
            .args(["account", "show"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()?;
        Ok(status.success())
    }

    fn issue_token(&self) -> Result<String> {
        let output = Command::new("az")
            .args([
                "account",
                "get-access-token",
                "--resource",
                AZURE_DEVOPS_RESOURCE,
            ])
            .stderr(Stdio::null())
            .output()
            .map_err(|e| Error::TokenAcquisitionFailed(format!("failed to run az: {e}")))?;

        if !output.status.success() {
            return Err(Error::TokenAcquisitionFailed(
                "az account get-access-token exited with an error".to_string(),
            ));
        }

        parse_token_json(&output.stdout)
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    #[serde(rename = "accessToken")]
    access_token: String,
}

fn parse_token_json(bytes: &[u8]) -> Result<String> {
    let response: TokenResponse = serde_json::from_slice(bytes)
        .map_err(|e| Error::TokenAcquisitionFailed(format!("unexpected az output: {e}")))?;
    Ok(response.access_token)
}

/// Run the three-step helper sequence and hand back a bearer token.
///
/// Any failure is surfaced immediately; the token is used for exactly
/// one request and then dropped.
pub fn acquire_token(helper: &dyn CredentialHelper) -> Result<String> {
    if !helper.is_available() {
        return Err(Error::CredentialHelperMissing);
    }
    if !helper.has_session()? {
        return Err(Error::NotAuthenticated);
    }
    debug!("requesting access token from credential helper");
    helper.issue_token()
}
