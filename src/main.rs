//! dotenvify - turn key/value data into shell-exportable .env files.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use dotenvify::cli::{execute, output, Cli};
use dotenvify::error::Error;

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env("DOTENVIFY_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("dotenvify=debug")
        } else {
            EnvFilter::new("dotenvify=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).without_time())
        .init();

    if let Err(e) = execute(cli.command) {
        let suggestion = match &e {
            Error::CredentialHelperMissing => {
                Some("install it: https://learn.microsoft.com/cli/azure/install-azure-cli")
            }
            Error::NotAuthenticated => Some("run: az login"),
            Error::GroupNotFound(_) => {
                Some("check the group name under Pipelines → Library in Azure DevOps")
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
