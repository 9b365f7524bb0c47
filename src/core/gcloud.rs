//! gcloud CLI backend.
//!
//! Implements both [`SecretStore`] and [`DeploymentPlatform`] by invoking the
//! `gcloud` command-line tool through a [`Runner`].
//!
//! ## Requirements
//!
//! - `gcloud` must be installed and authenticated
//! - The account needs Service Usage, Cloud Build, Cloud Run and Secret
//!   Manager permissions on the project

use tracing::{debug, trace};

use crate::core::domain::{set_secrets_arg, DeploymentTarget, Replication};
use crate::core::platform::{DeploymentPlatform, ServiceSpec};
use crate::core::runner::{Invocation, Runner};
use crate::core::store::SecretStore;
use crate::error::{PlatformError, Result};

/// URL reported in dry-run mode, where nothing is deployed.
const DRY_RUN_URL: &str = "<service-url>";

/// gcloud-backed secret store and run platform for one project.
pub struct Gcloud<R: Runner> {
    runner: R,
    binary: String,
    project_id: String,
    platform: String,
}

impl<R: Runner> Gcloud<R> {
    /// Create a backend that runs `binary` for `project_id`.
    pub fn new(runner: R, binary: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            runner,
            binary: binary.into(),
            project_id: project_id.into(),
            platform: crate::core::constants::PLATFORM.to_string(),
        }
    }

    /// Override the run platform (default `managed`).
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }

    /// Check that the gcloud binary can be found.
    ///
    /// Skipped in dry-run mode.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::ToolNotFound` if the binary is not on PATH.
    pub fn ensure_installed(&self) -> Result<()> {
        if self.runner.is_dry_run() {
            return Ok(());
        }
        let path = which::which(&self.binary)
            .map_err(|_| PlatformError::ToolNotFound(self.binary.clone()))?;
        debug!(path = %path.display(), "found gcloud");
        Ok(())
    }

    fn command(&self) -> Invocation {
        Invocation::new(&self.binary)
    }

    fn project_args(&self) -> [String; 2] {
        ["--project".to_string(), self.project_id.clone()]
    }

    fn service_args(&self, target: &DeploymentTarget) -> Vec<String> {
        vec![
            "--platform".to_string(),
            self.platform.clone(),
            "--region".to_string(),
            target.region().to_string(),
            "--project".to_string(),
            target.project_id().to_string(),
        ]
    }

    /// Run and fail on non-zero exit.
    fn exec(&self, invocation: Invocation) -> Result<String> {
        let output = self.runner.run(&invocation)?.check(&invocation)?;
        Ok(output.stdout)
    }
}

impl<R: Runner> SecretStore for Gcloud<R> {
    fn exists(&self, identifier: &str) -> Result<bool> {
        let invocation = self
            .command()
            .args(["secrets", "describe", identifier])
            .args(self.project_args())
            .args(["--format", "value(name)"]);

        let output = self.runner.run(&invocation)?;
        if self.runner.is_dry_run() {
            return Ok(false);
        }

        // Any failure to describe means "not there"; a real access problem
        // surfaces on the following create.
        trace!(identifier, code = ?output.code, "describe secret");
        Ok(output.success())
    }

    fn create(&self, identifier: &str, replication: &Replication) -> Result<()> {
        debug!(identifier, %replication, "creating secret");
        self.exec(
            self.command()
                .args(["secrets", "create", identifier])
                .args(replication.args())
                .args(self.project_args()),
        )?;
        Ok(())
    }

    fn add_version(&self, identifier: &str, value: &str) -> Result<()> {
        debug!(identifier, "adding secret version");
        self.exec(
            self.command()
                .args(["secrets", "versions", "add", identifier, "--data-file=-"])
                .args(self.project_args())
                .stdin(value),
        )?;
        Ok(())
    }
}

impl<R: Runner> DeploymentPlatform for Gcloud<R> {
    fn enable_apis(&self, project_id: &str, apis: &[String]) -> Result<()> {
        self.exec(
            self.command()
                .args(["services", "enable"])
                .args(apis.iter().cloned())
                .args(["--project", project_id]),
        )?;
        Ok(())
    }

    fn build(&self, target: &DeploymentTarget, image: &str, source: &str) -> Result<()> {
        self.exec(
            self.command()
                .args(["builds", "submit", source, "--tag", image])
                .args(["--project", target.project_id()]),
        )?;
        Ok(())
    }

    fn deploy(&self, target: &DeploymentTarget, spec: &ServiceSpec) -> Result<()> {
        let mut invocation = self
            .command()
            .args(["run", "deploy", target.service_name(), "--image", spec.image.as_str()])
            .args(self.service_args(target))
            .arg(if spec.allow_unauthenticated {
                "--allow-unauthenticated"
            } else {
                "--no-allow-unauthenticated"
            });

        if !spec.bindings.is_empty() {
            invocation = invocation.args(["--set-secrets".to_string(), set_secrets_arg(&spec.bindings)]);
        }

        self.exec(invocation.args(["--min-instances".to_string(), spec.min_instances.to_string()]))?;
        Ok(())
    }

    fn patch_allocation(&self, target: &DeploymentTarget) -> Result<()> {
        self.exec(
            self.command()
                .args(["run", "services", "update", target.service_name()])
                .arg("--no-cpu-throttling")
                .args(self.service_args(target)),
        )?;
        Ok(())
    }

    fn describe(&self, target: &DeploymentTarget) -> Result<String> {
        let invocation = self
            .command()
            .args(["run", "services", "describe", target.service_name()])
            .args(self.service_args(target))
            .args(["--format", "value(status.url)"]);
        let command = invocation.to_string();

        let stdout = self.exec(invocation)?;
        if self.runner.is_dry_run() {
            return Ok(DRY_RUN_URL.to_string());
        }

        let url = stdout.trim();
        if url.is_empty() {
            return Err(PlatformError::InvalidOutput {
                command,
                reason: "service has no URL".to_string(),
            }
            .into());
        }
        Ok(url.to_string())
    }
}
