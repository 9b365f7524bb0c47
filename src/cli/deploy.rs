//! Deploy command.
//!
//! Wires the command line, configuration and gcloud backend into the
//! deployment pipeline and prints progress.

use std::io;
use tracing::info;

use crate::cli::{output, Cli};
use crate::core::config::Config;
use crate::core::deploy::{Deployer, Plan, Progress, Stage};
use crate::core::domain::{DeployReport, DeploymentTarget, Outcome, SecretBinding, SecretEntry};
use crate::core::gcloud::Gcloud;
use crate::core::runner::{DryRunRunner, ProcessRunner, Runner};
use crate::error::Result;

/// Prints pipeline progress to the terminal.
struct ConsoleProgress {
    quiet: bool,
}

impl Progress for ConsoleProgress {
    fn stage(&mut self, stage: Stage) {
        if !self.quiet {
            output::step(stage.label());
        }
    }

    fn secret(&mut self, entry: &SecretEntry, outcome: Outcome) {
        if self.quiet {
            return;
        }
        let note = match outcome {
            Outcome::Created => "created",
            Outcome::Updated => "new version",
        };
        output::list_item(entry.identifier(), note);
    }

    fn unbound(&mut self, binding: &SecretBinding) {
        if !self.quiet {
            output::warn(&format!(
                "{} is bound to secret {} which does not exist",
                binding.env, binding.secret
            ));
        }
    }
}

/// Run a deployment.
pub fn execute(cli: Cli) -> Result<()> {
    let target = DeploymentTarget::from_args(&cli.args)?;
    let config = Config::load(cli.config.as_deref())?;

    let binary = cli
        .gcloud
        .clone()
        .unwrap_or_else(|| config.gcloud.binary.clone());

    let mut plan = Plan::new(target, config);
    if let Some(path) = &cli.secrets_file {
        plan.secrets_file = path.clone();
    }
    plan.source = cli.source.clone();
    plan.check_bindings = !cli.dry_run;

    info!(
        target = %plan.target,
        secrets_file = %plan.secrets_file.display(),
        dry_run = cli.dry_run,
        "running deploy"
    );

    let report = if cli.dry_run {
        output::dimmed("dry run: commands are printed, not executed");
        run(DryRunRunner::new(io::stdout()), &binary, &plan, false)?
    } else {
        run(ProcessRunner, &binary, &plan, cli.json)?
    };

    if cli.json {
        let json = serde_json::to_string_pretty(&report)?;
        println!("{}", json);
        return Ok(());
    }

    output::success(&format!("deployed {}", report.service));
    output::kv("image:", &report.image);
    output::kv("secrets:", report.secrets.total());
    output::kv("url:", &report.url);

    Ok(())
}

fn run<R: Runner>(runner: R, binary: &str, plan: &Plan, quiet: bool) -> Result<DeployReport> {
    let gcloud = Gcloud::new(runner, binary, plan.target.project_id())
        .with_platform(plan.config.deploy.platform.clone());
    gcloud.ensure_installed()?;

    let mut progress = ConsoleProgress { quiet };
    Deployer::new(&gcloud, &gcloud).run(plan, &mut progress)
}
