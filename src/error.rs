//! Error types.
//!
//! Each concern has its own error enum; all of them fold into [`Error`].

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Wrong command-line usage.
    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Env(#[from] EnvError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Process exit code for this error.
    ///
    /// A failed external command propagates its own exit code; everything
    /// else exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Platform(PlatformError::CommandFailed { code: Some(code), .. }) if *code != 0 => {
                *code
            }
            _ => 1,
        }
    }
}

/// Secrets file errors.
#[derive(Error, Debug)]
pub enum EnvError {
    #[error("secrets file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Only the length is kept; the line may be a bare secret value.
    #[error("line {line}: expected IDENTIFIER=VALUE, got {length} characters without '='")]
    MalformedLine { line: usize, length: usize },
}

/// Identifier validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("line {line}: secret identifier is empty")]
    EmptyIdentifier { line: usize },

    #[error("invalid secret identifier '{identifier}': {reason}")]
    InvalidIdentifier { identifier: String, reason: String },
}

/// Configuration file errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read config: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// External platform call errors.
#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("{0} not found on PATH")]
    ToolNotFound(String),

    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to exchange data with {program}: {source}")]
    Pipe {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` failed{}: {}", exit_suffix(.code), .stderr.trim())]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("unexpected output from `{command}`: {reason}")]
    InvalidOutput { command: String, reason: String },
}

fn exit_suffix(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!(" (exit {})", code),
        None => " (terminated by signal)".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, Error>;
