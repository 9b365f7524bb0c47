//! Cloudship - sync secrets and ship a container to a managed run service.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── deploy        # Wires config, backend and pipeline
//! │   └── output        # Terminal output helpers
//! └── core/             # Core library components
//!     ├── config        # cloudship.toml management
//!     ├── domain/       # Entries, targets, bindings, reports
//!     ├── env           # secrets.env parsing
//!     ├── reconcile     # exists / create / add-version per secret
//!     ├── deploy        # Linear deployment pipeline
//!     ├── store/        # SecretStore trait + in-memory store
//!     ├── platform/     # DeploymentPlatform trait + in-memory platform
//!     ├── gcloud        # gcloud CLI backend for both traits
//!     └── runner        # Process, dry-run and scripted command runners
//! ```
//!
//! # Pipeline
//!
//! 1. Enable the platform APIs
//! 2. Sync every `IDENTIFIER=VALUE` line of `secrets.env` into the secret store
//! 3. Build the container image
//! 4. Deploy the service with secret-backed environment bindings
//! 5. Switch the service to always-allocated CPU
//! 6. Print the service URL
//!
//! The first failing step stops the run.

pub mod cli;
pub mod core;
pub mod error;
