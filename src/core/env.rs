//! Secrets file parsing.
//!
//! The secrets file is line oriented: blank lines and lines whose first
//! non-whitespace character is `#` are comments, every other line is
//! `IDENTIFIER=VALUE`. Values are trimmed; quotes are kept as written.

use std::path::Path;
use tracing::debug;

use crate::core::domain::SecretEntry;
use crate::core::validation;
use crate::error::{EnvError, Result, ValidationError};

/// Lazy, single-pass iterator over the entries of a secrets file.
pub struct Entries<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
}

/// Iterate over the entries in `contents`.
pub fn entries(contents: &str) -> Entries<'_> {
    Entries {
        lines: contents.lines().enumerate(),
    }
}

impl Iterator for Entries<'_> {
    type Item = Result<SecretEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        for (index, line) in self.lines.by_ref() {
            if let Some(entry) = parse_line(index + 1, line).transpose() {
                return Some(entry);
            }
        }
        None
    }
}

/// Parse one line. `Ok(None)` for blank and comment lines.
pub fn parse_line(line_no: usize, line: &str) -> Result<Option<SecretEntry>> {
    let trimmed = line.trim_start();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let Some((identifier, value)) = line.split_once('=') else {
        return Err(EnvError::MalformedLine {
            line: line_no,
            length: line.trim().chars().count(),
        }
        .into());
    };

    let identifier = identifier.trim_end();
    if identifier.trim_start().is_empty() {
        return Err(ValidationError::EmptyIdentifier { line: line_no }.into());
    }
    validation::validate_identifier(identifier)?;

    Ok(Some(SecretEntry::new(identifier, value.trim())))
}

/// Read and parse a secrets file.
///
/// Every line is parsed before returning, so a malformed line is reported
/// before any entry is used.
///
/// # Errors
///
/// Returns `EnvError::NotFound` if the file does not exist, `EnvError::Read`
/// if it cannot be read, or the first parse error.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<SecretEntry>> {
    let path = path.as_ref();
    debug!(path = %path.display(), "loading secrets file");

    if !path.exists() {
        return Err(EnvError::NotFound(path.to_path_buf()).into());
    }

    let contents = std::fs::read_to_string(path).map_err(|source| EnvError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let parsed = entries(&contents).collect::<Result<Vec<_>>>()?;
    debug!(entries = parsed.len(), "secrets file parsed");

    Ok(parsed)
}
