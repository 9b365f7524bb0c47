//! In-memory deployment platform.
//!
//! Records every call and can be told to fail one of them.

use std::cell::RefCell;

use super::{DeploymentPlatform, ServiceSpec};
use crate::core::domain::DeploymentTarget;
use crate::error::{PlatformError, Result};

/// Platform that records calls instead of deploying anything.
#[derive(Debug, Default)]
pub struct MemoryPlatform {
    calls: RefCell<Vec<String>>,
    deployed: RefCell<Option<ServiceSpec>>,
    fail_on: Option<&'static str>,
}

impl MemoryPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the named call (`enable_apis`, `build`, `deploy`,
    /// `patch_allocation`, `describe`) fail.
    pub fn failing(mut self, call: &'static str) -> Self {
        self.fail_on = Some(call);
        self
    }

    /// Names of the calls made so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Spec passed to the last successful deploy.
    pub fn deployed(&self) -> Option<ServiceSpec> {
        self.deployed.borrow().clone()
    }

    fn enter(&self, call: &'static str) -> Result<()> {
        self.calls.borrow_mut().push(call.to_string());
        if self.fail_on == Some(call) {
            return Err(PlatformError::CommandFailed {
                command: call.to_string(),
                code: Some(1),
                stderr: "injected failure".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

impl DeploymentPlatform for MemoryPlatform {
    fn enable_apis(&self, _project_id: &str, _apis: &[String]) -> Result<()> {
        self.enter("enable_apis")
    }

    fn build(&self, _target: &DeploymentTarget, _image: &str, _source: &str) -> Result<()> {
        self.enter("build")
    }

    fn deploy(&self, _target: &DeploymentTarget, spec: &ServiceSpec) -> Result<()> {
        self.enter("deploy")?;
        *self.deployed.borrow_mut() = Some(spec.clone());
        Ok(())
    }

    fn patch_allocation(&self, _target: &DeploymentTarget) -> Result<()> {
        self.enter("patch_allocation")
    }

    fn describe(&self, target: &DeploymentTarget) -> Result<String> {
        self.enter("describe")?;
        Ok(format!("https://{}.run.app", target.service_name()))
    }
}
