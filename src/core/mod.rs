//! Core library components.
//!
//! This module contains the reusable deployment logic: secrets file parsing,
//! secret reconciliation, the deployment pipeline and its backends.

pub mod config;
pub mod constants;
pub mod deploy;
pub mod domain;
pub mod env;
pub mod gcloud;
pub mod platform;
pub mod reconcile;
pub mod runner;
pub mod store;
pub mod validation;
