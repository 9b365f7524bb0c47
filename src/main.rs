//! Cloudship - sync secrets and ship a container to a managed run service.

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cloudship::cli::{execute, output, Cli};
use cloudship::core::constants;
use cloudship::error::{EnvError, Error, PlatformError};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(constants::LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("cloudship=debug")
        } else {
            EnvFilter::new("cloudship=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = execute(cli) {
        output::error(&e.to_string());

        match &e {
            Error::Usage(_) => {
                eprintln!("{}", Cli::command().render_usage());
            }
            Error::Env(EnvError::NotFound(_)) => {
                output::hint("create it with one IDENTIFIER=VALUE pair per line");
            }
            Error::Platform(PlatformError::ToolNotFound(_)) => {
                output::hint("install it from https://cloud.google.com/sdk/docs/install");
            }
            _ => {}
        }

        std::process::exit(e.exit_code());
    }
}
