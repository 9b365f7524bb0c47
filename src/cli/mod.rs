//! Command-line interface.

pub mod deploy;
pub mod output;

use clap::Parser;
use std::path::PathBuf;

use crate::core::constants;

/// Cloudship - sync secrets and ship a container to a managed run service.
#[derive(Parser, Debug)]
#[command(
    name = "cloudship",
    about = "Sync secrets and ship a container to a managed run service",
    version,
    override_usage = "cloudship [OPTIONS] <PROJECT_ID> <REGION> <SERVICE_NAME>",
    after_help = "Secrets are read from secrets.env (IDENTIFIER=VALUE per line, # for comments)."
)]
pub struct Cli {
    /// Project id, region and service name
    #[arg(value_name = "ARGS", num_args = 0..)]
    pub args: Vec<String>,

    /// Secrets file to sync [default: secrets.env]
    #[arg(short = 'f', long, value_name = "PATH")]
    pub secrets_file: Option<PathBuf>,

    /// Configuration file [default: cloudship.toml if present]
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Build context directory
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub source: String,

    /// gcloud binary to run
    #[arg(long, value_name = "PATH", env = constants::GCLOUD_ENV)]
    pub gcloud: Option<String>,

    /// Print the commands instead of running them
    #[arg(long)]
    pub dry_run: bool,

    /// Print the final report as JSON
    #[arg(long, conflicts_with = "dry_run")]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Execute a parsed command line.
pub fn execute(cli: Cli) -> crate::error::Result<()> {
    deploy::execute(cli)
}
