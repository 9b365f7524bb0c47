//! Secret store abstraction.
//!
//! The reconciler only needs three operations from a secret store: check
//! whether a secret exists, create it, and append a version. Values are
//! never read back.
//!
//! ## Adding a New Store
//!
//! 1. Implement the `SecretStore` trait
//! 2. Hand it to `Deployer::new` in place of the gcloud backend
//!
//! ## Example
//!
//! ```ignore
//! struct Vault { /* ... */ }
//!
//! impl SecretStore for Vault {
//!     fn exists(&self, identifier: &str) -> Result<bool> { /* ... */ }
//!     fn create(&self, identifier: &str, replication: &Replication) -> Result<()> { /* ... */ }
//!     fn add_version(&self, identifier: &str, value: &str) -> Result<()> { /* ... */ }
//! }
//! ```

use crate::core::domain::Replication;
use crate::error::Result;

mod memory;

pub use memory::{MemoryStore, StoreOp};

/// Versioned, named secret storage.
pub trait SecretStore {
    /// Check whether a secret named `identifier` exists.
    ///
    /// # Errors
    ///
    /// Returns an error only when the store cannot be queried at all.
    fn exists(&self, identifier: &str) -> Result<bool>;

    /// Create an empty secret with the given replication policy.
    ///
    /// # Errors
    ///
    /// Returns an error if creation fails, including when it already exists.
    fn create(&self, identifier: &str, replication: &Replication) -> Result<()>;

    /// Append `value` as the new latest version of `identifier`.
    ///
    /// # Errors
    ///
    /// Returns an error if the secret does not exist or the write fails.
    fn add_version(&self, identifier: &str, value: &str) -> Result<()>;
}

impl<S: SecretStore + ?Sized> SecretStore for &S {
    fn exists(&self, identifier: &str) -> Result<bool> {
        (**self).exists(identifier)
    }

    fn create(&self, identifier: &str, replication: &Replication) -> Result<()> {
        (**self).create(identifier, replication)
    }

    fn add_version(&self, identifier: &str, value: &str) -> Result<()> {
        (**self).add_version(identifier, value)
    }
}
