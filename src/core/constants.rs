//! Constants used throughout cloudship.
//!
//! Centralizes magic strings and default configuration values.

/// Default secrets file name (secrets.env).
pub const SECRETS_FILE: &str = "secrets.env";

/// Default configuration file name (cloudship.toml).
pub const CONFIG_FILE: &str = "cloudship.toml";

/// Default platform CLI binary.
pub const GCLOUD_BIN: &str = "gcloud";

/// Environment variable overriding the platform CLI binary.
pub const GCLOUD_ENV: &str = "CLOUDSHIP_GCLOUD";

/// Environment variable holding a tracing filter directive.
pub const LOG_ENV: &str = "CLOUDSHIP_LOG";

/// Default container registry host.
pub const REGISTRY: &str = "gcr.io";

/// Default run platform.
pub const PLATFORM: &str = "managed";

/// Platform APIs enabled before anything else.
pub const REQUIRED_APIS: &[&str] = &[
    "run.googleapis.com",
    "cloudbuild.googleapis.com",
    "secretmanager.googleapis.com",
];

/// Secrets bound to the service's environment at deploy time.
///
/// Each entry is bound by reference to the `latest` version of the
/// same-named secret.
pub const BOUND_SECRETS: &[&str] = &["EMAIL_SENDER", "EMAIL_PASSWORD", "EMAIL_RECEIVER", "TIMEZONE"];

/// Version alias used for bindings.
pub const LATEST: &str = "latest";

/// Always-running instance floor.
pub const MIN_INSTANCES: u32 = 1;

/// Longest secret identifier the store accepts.
pub const MAX_IDENTIFIER_LEN: usize = 255;
