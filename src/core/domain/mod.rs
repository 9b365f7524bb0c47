//! Domain types.

mod binding;
mod replication;
mod report;
mod secret;
mod target;

pub use binding::{set_secrets_arg, SecretBinding};
pub use replication::Replication;
pub use report::{DeployReport, Outcome, SyncReport};
pub use secret::SecretEntry;
pub use target::DeploymentTarget;
