//! Secret binding type.
//!
//! Maps a service environment variable to a version of a stored secret.

use serde::{Deserialize, Serialize};

use crate::core::constants;

/// Environment variable bound to a secret version at deploy time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SecretBinding {
    /// Environment variable name inside the service
    pub env: String,
    /// Secret identifier in the store
    pub secret: String,
    /// Version alias or number
    #[serde(default = "latest")]
    pub version: String,
}

fn latest() -> String {
    constants::LATEST.to_string()
}

impl SecretBinding {
    /// Bind `name` to the latest version of the same-named secret
    pub fn latest(name: &str) -> Self {
        Self {
            env: name.to_string(),
            secret: name.to_string(),
            version: latest(),
        }
    }

    /// The built-in binding table.
    pub fn defaults() -> Vec<Self> {
        constants::BOUND_SECRETS
            .iter()
            .map(|name| Self::latest(name))
            .collect()
    }
}

impl std::fmt::Display for SecretBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}:{}", self.env, self.secret, self.version)
    }
}

/// Join bindings into the `--set-secrets` argument form.
pub fn set_secrets_arg(bindings: &[SecretBinding]) -> String {
    bindings
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
