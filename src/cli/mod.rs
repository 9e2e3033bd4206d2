//! Command-line interface.

pub mod convert;
pub mod fetch;
pub mod output;

use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::core::env::OutputPolicy;

/// dotenvify - turn key/value data into shell-exportable .env files.
#[derive(Parser)]
#[command(
    name = "dotenvify",
    about = "Convert key/value data and Azure DevOps variable groups into .env files",
    version
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Convert a local key/value file into .env format
    Convert {
        /// Source file to read
        source: PathBuf,

        /// Output file (defaults to .env)
        output: Option<PathBuf>,

        #[command(flatten)]
        policy: PolicyArgs,
    },

    /// Fetch an Azure DevOps variable group and write it as .env
    Fetch {
        /// Project URL, e.g. https://dev.azure.com/org/project
        /// (default: $AZURE_DEVOPS_URL)
        #[arg(long)]
        url: Option<String>,

        /// Organization name (default: $AZURE_DEVOPS_ORG)
        #[arg(long)]
        org: Option<String>,

        /// Project name (default: $AZURE_DEVOPS_PROJECT)
        #[arg(long)]
        project: Option<String>,

        /// Variable group name (default: current directory name)
        #[arg(long)]
        group: Option<String>,

        /// Output file path
        #[arg(long, default_value = ".env")]
        output: PathBuf,

        /// Include variables disabled in the remote group
        #[arg(long)]
        include_disabled: bool,

        #[command(flatten)]
        policy: PolicyArgs,
    },
}

/// Output-policy flags shared by both modes.
#[derive(Args)]
pub struct PolicyArgs {
    /// Keep input order instead of sorting keys alphabetically
    #[arg(long)]
    pub no_sort: bool,

    /// Keep all-lowercase keys (disable the lowercase filter)
    #[arg(long)]
    pub no_lower: bool,

    /// Prefix each line with `export `
    #[arg(long)]
    pub export: bool,

    /// Only keep variables whose value is an http(s) URL
    #[arg(long)]
    pub url_only: bool,

    /// Overwrite the output file without creating a backup
    #[arg(long)]
    pub overwrite: bool,

    /// Keep the existing value of NAME from the output file (repeatable)
    #[arg(long, value_name = "NAME")]
    pub preserve: Vec<String>,
}

impl PolicyArgs {
    pub fn policy(&self) -> OutputPolicy {
        OutputPolicy {
            sort_keys: !self.no_sort,
            use_export_prefix: self.export,
            lowercase_filter: !self.no_lower,
            url_only_filter: self.url_only,
        }
    }

    pub fn preserve_set(&self) -> BTreeSet<String> {
        self.preserve.iter().cloned().collect()
    }
}

/// Execute a command.
pub fn execute(command: Command) -> crate::error::Result<()> {
    match command {
        Command::Convert {
            source,
            output,
            policy,
        } => convert::execute(&source, output, &policy),
        Command::Fetch {
            url,
            org,
            project,
            group,
            output,
            include_disabled,
            policy,
        } => fetch::execute(fetch::FetchArgs {
            url,
            org,
            project,
            group,
            output,
            include_disabled,
            policy,
        }),
    }
}
