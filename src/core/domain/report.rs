//! Run reports.

use serde::Serialize;

/// What reconciling a single secret did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Secret did not exist and was created before the version was added
    Created,
    /// Secret existed; a new version was added
    Updated,
}

/// Result of syncing the secrets file into the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Secrets created during this run
    pub created: Vec<String>,
    /// Existing secrets that received a new version
    pub updated: Vec<String>,
}

impl SyncReport {
    /// Record one reconciled secret
    pub fn record(&mut self, identifier: &str, outcome: Outcome) {
        match outcome {
            Outcome::Created => self.created.push(identifier.to_string()),
            Outcome::Updated => self.updated.push(identifier.to_string()),
        }
    }

    /// Number of versions added
    pub fn total(&self) -> usize {
        self.created.len() + self.updated.len()
    }
}

/// Result of a full deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeployReport {
    pub project: String,
    pub region: String,
    pub service: String,
    pub image: String,
    pub url: String,
    pub secrets: SyncReport,
}
