//! Secret reconciliation.
//!
//! Makes the store's latest version of each secret equal the value in the
//! secrets file. Every run appends a version, even when the value is
//! unchanged; existing versions are never touched.

use tracing::{debug, info};

use crate::core::domain::{Outcome, Replication, SecretEntry, SyncReport};
use crate::core::store::SecretStore;
use crate::error::Result;

/// Ensure `entry`'s secret exists, then append its value as a new version.
///
/// # Errors
///
/// Returns the store's error from the first failing step; nothing is retried
/// or rolled back.
pub fn reconcile<S: SecretStore + ?Sized>(
    store: &S,
    entry: &SecretEntry,
    replication: &Replication,
) -> Result<Outcome> {
    let identifier = entry.identifier();

    let outcome = if store.exists(identifier)? {
        debug!(identifier, "secret exists");
        Outcome::Updated
    } else {
        info!(identifier, "creating secret");
        store.create(identifier, replication)?;
        Outcome::Created
    };

    store.add_version(identifier, entry.value())?;
    debug!(identifier, ?outcome, "version added");

    Ok(outcome)
}

/// Reconcile entries in order, stopping at the first failure.
///
/// Secrets processed before a failure keep their new versions.
pub fn reconcile_all<'a, S, I>(
    store: &S,
    entries: I,
    replication: &Replication,
    mut on_entry: impl FnMut(&SecretEntry, Outcome),
) -> Result<SyncReport>
where
    S: SecretStore + ?Sized,
    I: IntoIterator<Item = &'a SecretEntry>,
{
    let mut report = SyncReport::default();

    for entry in entries {
        let outcome = reconcile(store, entry, replication)?;
        on_entry(entry, outcome);
        report.record(entry.identifier(), outcome);
    }

    Ok(report)
}
