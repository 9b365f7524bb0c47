//! Deployment target type.

use std::fmt;

use crate::error::{Error, Result};

/// Where the service is deployed: project, region and service name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentTarget {
    project_id: String,
    region: String,
    service_name: String,
}

impl DeploymentTarget {
    /// Create a target from the three invocation parameters
    pub fn new(
        project_id: impl Into<String>,
        region: impl Into<String>,
        service_name: impl Into<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            region: region.into(),
            service_name: service_name.into(),
        }
    }

    /// Build a target from positional arguments.
    ///
    /// # Errors
    ///
    /// Returns `Error::Usage` unless exactly three arguments are given.
    pub fn from_args(args: &[String]) -> Result<Self> {
        match args {
            [project_id, region, service_name] => {
                Ok(Self::new(project_id, region, service_name))
            }
            _ => Err(Error::Usage(format!(
                "expected 3 arguments (PROJECT_ID REGION SERVICE_NAME), got {}",
                args.len()
            ))),
        }
    }

    /// Cloud project identifier
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Deployment region
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Managed service name
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Container image reference, tagged with project and service.
    ///
    /// Example: `gcr.io/my-project/my-service`
    pub fn image(&self, registry: &str) -> String {
        format!(
            "{}/{}/{}",
            registry.trim_end_matches('/'),
            self.project_id,
            self.service_name
        )
    }
}

impl fmt::Display for DeploymentTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} ({})",
            self.project_id, self.service_name, self.region
        )
    }
}
