//! Secret replication policy.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Placement policy used when a secret is created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Replication {
    /// Let the store choose locations
    #[default]
    Automatic,
    /// Replicate to the listed locations only
    UserManaged(Vec<String>),
}

impl Replication {
    /// Arguments for `gcloud secrets create`.
    pub fn args(&self) -> Vec<String> {
        match self {
            Replication::Automatic => vec!["--replication-policy=automatic".to_string()],
            Replication::UserManaged(locations) => vec![
                "--replication-policy=user-managed".to_string(),
                format!("--locations={}", locations.join(",")),
            ],
        }
    }
}

impl FromStr for Replication {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "automatic" {
            return Ok(Replication::Automatic);
        }

        let Some(rest) = s.strip_prefix("user-managed:") else {
            return Err(format!(
                "expected 'automatic' or 'user-managed:<locations>', got '{}'",
                s
            ));
        };

        let locations: Vec<String> = rest
            .split(',')
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect();

        if locations.is_empty() {
            return Err("user-managed replication needs at least one location".to_string());
        }

        Ok(Replication::UserManaged(locations))
    }
}

impl TryFrom<String> for Replication {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Replication> for String {
    fn from(value: Replication) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Replication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Replication::Automatic => write!(f, "automatic"),
            Replication::UserManaged(locations) => {
                write!(f, "user-managed:{}", locations.join(","))
            }
        }
    }
}
