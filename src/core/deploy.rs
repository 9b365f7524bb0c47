//! Deployment driver.
//!
//! Runs the deployment as a strictly linear pipeline:
//!
//! ```text
//! EnableApis -> ReconcileSecrets -> BuildImage -> DeployService
//!            -> PatchCpuAllocation -> ReportUrl
//! ```
//!
//! The first failing stage stops the run. Nothing already done is undone.

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::core::config::Config;
use crate::core::domain::{DeployReport, DeploymentTarget, Outcome, SecretBinding, SecretEntry};
use crate::core::env;
use crate::core::platform::{DeploymentPlatform, ServiceSpec};
use crate::core::reconcile;
use crate::core::store::SecretStore;
use crate::error::Result;

/// Pipeline stage, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    EnableApis,
    ReconcileSecrets,
    BuildImage,
    DeployService,
    PatchCpuAllocation,
    ReportUrl,
}

impl Stage {
    /// Progress label shown before the stage runs.
    pub fn label(&self) -> &'static str {
        match self {
            Stage::EnableApis => "Enabling platform APIs",
            Stage::ReconcileSecrets => "Syncing secrets",
            Stage::BuildImage => "Building container image",
            Stage::DeployService => "Deploying service",
            Stage::PatchCpuAllocation => "Switching CPU to always allocated",
            Stage::ReportUrl => "Fetching service URL",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Receives progress events while the pipeline runs.
///
/// All methods default to doing nothing.
pub trait Progress {
    /// A stage is about to start.
    fn stage(&mut self, _stage: Stage) {}

    /// A secret got a new version.
    fn secret(&mut self, _entry: &SecretEntry, _outcome: Outcome) {}

    /// A bound secret is neither in the secrets file nor in the store.
    fn unbound(&mut self, _binding: &SecretBinding) {}
}

impl Progress for () {}

/// Everything a run needs besides the backends.
#[derive(Debug, Clone)]
pub struct Plan {
    pub target: DeploymentTarget,
    pub config: Config,
    /// Secrets file, relative to the working directory
    pub secrets_file: PathBuf,
    /// Build context directory
    pub source: String,
    /// Look up bound secrets missing from the secrets file
    pub check_bindings: bool,
}

impl Plan {
    pub fn new(target: DeploymentTarget, config: Config) -> Self {
        let secrets_file = config.secrets.file.clone();
        Self {
            target,
            config,
            secrets_file,
            source: ".".to_string(),
            check_bindings: true,
        }
    }

    /// Image reference the build produces and the service runs.
    pub fn image(&self) -> String {
        self.target.image(&self.config.deploy.registry)
    }
}

/// Drives a deployment against a secret store and a run platform.
pub struct Deployer<S, P> {
    store: S,
    platform: P,
}

impl<S: SecretStore, P: DeploymentPlatform> Deployer<S, P> {
    pub fn new(store: S, platform: P) -> Self {
        Self { store, platform }
    }

    /// Run every stage in order.
    ///
    /// # Errors
    ///
    /// Returns the first stage's error; later stages do not run.
    pub fn run(&self, plan: &Plan, progress: &mut dyn Progress) -> Result<DeployReport> {
        let target = &plan.target;
        let deploy = &plan.config.deploy;
        let image = plan.image();

        info!(%target, %image, "starting deployment");

        progress.stage(Stage::EnableApis);
        self.platform
            .enable_apis(target.project_id(), &deploy.apis)?;

        progress.stage(Stage::ReconcileSecrets);
        let entries = env::load(&plan.secrets_file)?;
        let secrets = reconcile::reconcile_all(
            &self.store,
            &entries,
            &plan.config.secrets.replication,
            |entry, outcome| progress.secret(entry, outcome),
        )?;
        info!(
            created = secrets.created.len(),
            updated = secrets.updated.len(),
            "secrets synced"
        );

        if plan.check_bindings {
            self.check_bindings(&plan.config.bindings, &entries, progress)?;
        }

        progress.stage(Stage::BuildImage);
        self.platform.build(target, &image, &plan.source)?;

        progress.stage(Stage::DeployService);
        let spec = ServiceSpec {
            image: image.clone(),
            bindings: plan.config.bindings.clone(),
            min_instances: deploy.min_instances,
            allow_unauthenticated: deploy.allow_unauthenticated,
        };
        self.platform.deploy(target, &spec)?;

        if deploy.cpu_always_allocated {
            progress.stage(Stage::PatchCpuAllocation);
            self.platform.patch_allocation(target)?;
        }

        progress.stage(Stage::ReportUrl);
        let url = self.platform.describe(target)?;
        info!(%url, "deployment finished");

        Ok(DeployReport {
            project: target.project_id().to_string(),
            region: target.region().to_string(),
            service: target.service_name().to_string(),
            image,
            url,
            secrets,
        })
    }

    /// Warn about bindings that would reference a secret nobody created.
    fn check_bindings(
        &self,
        bindings: &[SecretBinding],
        entries: &[SecretEntry],
        progress: &mut dyn Progress,
    ) -> Result<()> {
        let synced: BTreeSet<&str> = entries.iter().map(SecretEntry::identifier).collect();

        for binding in bindings {
            if synced.contains(binding.secret.as_str()) {
                continue;
            }
            if !self.store.exists(&binding.secret)? {
                warn!(env = %binding.env, secret = %binding.secret, "bound secret does not exist");
                progress.unbound(binding);
            }
        }
        Ok(())
    }
}
