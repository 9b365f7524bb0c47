//! In-memory secret store.
//!
//! Keeps every version in a map and can be told to fail specific operations.
//! Used by tests and for exercising the driver without a platform.

use std::cell::RefCell;
use std::collections::BTreeMap;

use super::SecretStore;
use crate::core::domain::Replication;
use crate::error::{PlatformError, Result};

/// Store operation, used to inject failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    Exists,
    Create,
    AddVersion,
}

/// Secret store backed by a map of identifier to version history.
#[derive(Debug, Default)]
pub struct MemoryStore {
    secrets: RefCell<BTreeMap<String, Vec<String>>>,
    policies: RefCell<BTreeMap<String, Replication>>,
    failures: Vec<(StoreOp, String)>,
    calls: RefCell<Vec<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an existing secret with prior versions.
    pub fn with_secret(self, identifier: &str, versions: &[&str]) -> Self {
        self.secrets.borrow_mut().insert(
            identifier.to_string(),
            versions.iter().map(|v| v.to_string()).collect(),
        );
        self
    }

    /// Make `op` fail for `identifier`.
    pub fn failing(mut self, op: StoreOp, identifier: &str) -> Self {
        self.failures.push((op, identifier.to_string()));
        self
    }

    /// Version history of a secret, oldest first.
    pub fn versions(&self, identifier: &str) -> Option<Vec<String>> {
        self.secrets.borrow().get(identifier).cloned()
    }

    /// Latest version of a secret.
    pub fn latest(&self, identifier: &str) -> Option<String> {
        self.secrets
            .borrow()
            .get(identifier)
            .and_then(|versions| versions.last().cloned())
    }

    /// Replication policy a secret was created with.
    pub fn replication(&self, identifier: &str) -> Option<Replication> {
        self.policies.borrow().get(identifier).cloned()
    }

    /// Operations performed so far, as `op:identifier`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn enter(&self, op: StoreOp, identifier: &str) -> Result<()> {
        let name = match op {
            StoreOp::Exists => "exists",
            StoreOp::Create => "create",
            StoreOp::AddVersion => "add_version",
        };
        self.calls
            .borrow_mut()
            .push(format!("{}:{}", name, identifier));

        if self
            .failures
            .iter()
            .any(|(o, id)| *o == op && id == identifier)
        {
            return Err(PlatformError::CommandFailed {
                command: format!("{} {}", name, identifier),
                code: Some(1),
                stderr: "injected failure".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

impl SecretStore for MemoryStore {
    fn exists(&self, identifier: &str) -> Result<bool> {
        self.enter(StoreOp::Exists, identifier)?;
        Ok(self.secrets.borrow().contains_key(identifier))
    }

    fn create(&self, identifier: &str, replication: &Replication) -> Result<()> {
        self.enter(StoreOp::Create, identifier)?;

        let mut secrets = self.secrets.borrow_mut();
        if secrets.contains_key(identifier) {
            return Err(PlatformError::CommandFailed {
                command: format!("create {}", identifier),
                code: Some(1),
                stderr: format!("secret [{}] already exists", identifier),
            }
            .into());
        }
        secrets.insert(identifier.to_string(), Vec::new());
        self.policies
            .borrow_mut()
            .insert(identifier.to_string(), replication.clone());
        Ok(())
    }

    fn add_version(&self, identifier: &str, value: &str) -> Result<()> {
        self.enter(StoreOp::AddVersion, identifier)?;

        match self.secrets.borrow_mut().get_mut(identifier) {
            Some(versions) => {
                versions.push(value.to_string());
                Ok(())
            }
            None => Err(PlatformError::CommandFailed {
                command: format!("add_version {}", identifier),
                code: Some(1),
                stderr: format!("secret [{}] not found", identifier),
            }
            .into()),
        }
    }
}
