//! Deployment platform abstraction.
//!
//! Everything the driver asks of the run platform besides secrets.

use crate::core::domain::{DeploymentTarget, SecretBinding};
use crate::error::Result;

mod memory;

pub use memory::MemoryPlatform;

/// Service settings applied at deploy time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSpec {
    /// Container image to run
    pub image: String,
    /// Secret-backed environment variables
    pub bindings: Vec<SecretBinding>,
    /// Always-running instance floor
    pub min_instances: u32,
    /// Serve unauthenticated requests
    pub allow_unauthenticated: bool,
}

/// Build and run-service operations.
pub trait DeploymentPlatform {
    /// Enable the named platform APIs. Safe to repeat.
    fn enable_apis(&self, project_id: &str, apis: &[String]) -> Result<()>;

    /// Build `source` into a container image tagged `image`.
    fn build(&self, target: &DeploymentTarget, image: &str, source: &str) -> Result<()>;

    /// Deploy the service.
    fn deploy(&self, target: &DeploymentTarget, spec: &ServiceSpec) -> Result<()>;

    /// Switch the service to always-allocated CPU.
    ///
    /// Separate from [`deploy`](Self::deploy): some platform versions reject
    /// the allocation flag on an initial deploy.
    fn patch_allocation(&self, target: &DeploymentTarget) -> Result<()>;

    /// Public URL of the deployed service.
    fn describe(&self, target: &DeploymentTarget) -> Result<String>;
}

impl<P: DeploymentPlatform + ?Sized> DeploymentPlatform for &P {
    fn enable_apis(&self, project_id: &str, apis: &[String]) -> Result<()> {
        (**self).enable_apis(project_id, apis)
    }

    fn build(&self, target: &DeploymentTarget, image: &str, source: &str) -> Result<()> {
        (**self).build(target, image, source)
    }

    fn deploy(&self, target: &DeploymentTarget, spec: &ServiceSpec) -> Result<()> {
        (**self).deploy(target, spec)
    }

    fn patch_allocation(&self, target: &DeploymentTarget) -> Result<()> {
        (**self).patch_allocation(target)
    }

    fn describe(&self, target: &DeploymentTarget) -> Result<String> {
        (**self).describe(target)
    }
}
