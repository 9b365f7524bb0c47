//! Configuration file management.
//!
//! Handles reading and validating the optional `cloudship.toml`. Every field
//! has a built-in default, so a missing file means "use the defaults".

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::constants;
use crate::core::domain::{Replication, SecretBinding};
use crate::core::validation;
use crate::error::{ConfigError, Result};

/// Deployment configuration stored in `cloudship.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Build and deploy settings
    #[serde(default)]
    pub deploy: DeploySettings,
    /// Secrets file and creation policy
    #[serde(default)]
    pub secrets: SecretsSettings,
    /// Secret-to-environment binding table
    #[serde(default = "SecretBinding::defaults")]
    pub bindings: Vec<SecretBinding>,
    /// gcloud CLI settings
    #[serde(default)]
    pub gcloud: GcloudSettings,
}

/// `[deploy]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeploySettings {
    /// Platform APIs enabled before anything else
    pub apis: Vec<String>,
    /// Container registry host the image is tagged under
    pub registry: String,
    /// Run platform
    pub platform: String,
    /// Always-running instance floor
    pub min_instances: u32,
    /// Serve unauthenticated requests
    pub allow_unauthenticated: bool,
    /// Patch the service to always-allocated CPU after deploying
    pub cpu_always_allocated: bool,
}

impl Default for DeploySettings {
    fn default() -> Self {
        Self {
            apis: constants::REQUIRED_APIS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            registry: constants::REGISTRY.to_string(),
            platform: constants::PLATFORM.to_string(),
            min_instances: constants::MIN_INSTANCES,
            allow_unauthenticated: true,
            cpu_always_allocated: true,
        }
    }
}

/// `[secrets]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SecretsSettings {
    /// Path of the key-value secrets file
    pub file: PathBuf,
    /// Replication policy for newly created secrets
    pub replication: Replication,
}

impl Default for SecretsSettings {
    fn default() -> Self {
        Self {
            file: PathBuf::from(constants::SECRETS_FILE),
            replication: Replication::Automatic,
        }
    }
}

/// `[gcloud]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GcloudSettings {
    /// Binary name or path
    pub binary: String,
}

impl Default for GcloudSettings {
    fn default() -> Self {
        Self {
            binary: constants::GCLOUD_BIN.to_string(),
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// With an explicit `path` the file must exist. Without one,
    /// `cloudship.toml` in the current directory is used if present and the
    /// defaults otherwise.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` for a missing explicit path,
    /// `ConfigError::Parse` for malformed TOML, or a validation error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound(path.to_path_buf()).into())
            }
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(constants::CONFIG_FILE);
                if !default.exists() {
                    debug!("no config file, using defaults");
                    return Ok(Self::default());
                }
                default
            }
        };

        debug!(path = %path.display(), "loading config");
        let contents = std::fs::read_to_string(&path).map_err(ConfigError::ReadFile)?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).map_err(ConfigError::Parse)?;

        debug!(
            apis = config.deploy.apis.len(),
            bindings = config.bindings.len(),
            "config loaded"
        );

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration contents
    ///
    /// Checks:
    /// - At least one API is enabled
    /// - Registry and gcloud binary are non-empty
    /// - Binding environment names and secret identifiers are valid
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` on validation failure.
    pub fn validate(&self) -> Result<()> {
        debug!("validating config");

        if self.deploy.apis.is_empty() {
            return Err(invalid("deploy.apis", "at least one API is required"));
        }

        if let Some(api) = self.deploy.apis.iter().find(|a| a.trim().is_empty()) {
            return Err(invalid("deploy.apis", format!("empty API name {:?}", api)));
        }

        if self.deploy.registry.trim().is_empty() {
            return Err(invalid("deploy.registry", "cannot be empty"));
        }

        if self.gcloud.binary.trim().is_empty() {
            return Err(invalid("gcloud.binary", "cannot be empty"));
        }

        for binding in &self.bindings {
            validation::validate_env_name(&binding.env)
                .map_err(|e| invalid("bindings", e.to_string()))?;
            validation::validate_identifier(&binding.secret)
                .map_err(|e| invalid("bindings", e.to_string()))?;
            if binding.version.trim().is_empty() {
                return Err(invalid(
                    "bindings",
                    format!("empty version for {}", binding.env),
                ));
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            deploy: DeploySettings::default(),
            secrets: SecretsSettings::default(),
            bindings: SecretBinding::defaults(),
            gcloud: GcloudSettings::default(),
        }
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> crate::error::Error {
    ConfigError::InvalidValue {
        field,
        reason: reason.into(),
    }
    .into()
}
