//! Input validation for secret identifiers and environment names.

use crate::core::constants::MAX_IDENTIFIER_LEN;
use crate::error::{Result, ValidationError};

/// Validate a secret identifier.
///
/// Secret identifiers must match what the secret store accepts:
/// - 1 to 255 characters
/// - Only ASCII letters, digits, underscore and hyphen
///
/// # Errors
///
/// Returns `ValidationError::InvalidIdentifier` if the identifier is rejected.
pub fn validate_identifier(identifier: &str) -> Result<()> {
    if identifier.is_empty() {
        return Err(invalid(identifier, "cannot be empty".to_string()));
    }

    if identifier.len() > MAX_IDENTIFIER_LEN {
        return Err(invalid(
            identifier,
            format!("longer than {} characters", MAX_IDENTIFIER_LEN),
        ));
    }

    for (i, ch) in identifier.chars().enumerate() {
        if !ch.is_ascii_alphanumeric() && ch != '_' && ch != '-' {
            return Err(invalid(
                identifier,
                format!(
                    "invalid character {:?} at position {}. Only A-Z, a-z, 0-9, '_' and '-' are allowed",
                    ch,
                    i + 1
                ),
            ));
        }
    }

    Ok(())
}

/// Validate an environment variable name used in a secret binding.
///
/// - Only A-Z, a-z, 0-9, and underscore
/// - Cannot start with a digit
///
/// # Errors
///
/// Returns `ValidationError::InvalidIdentifier` if the name is rejected.
pub fn validate_env_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(invalid(name, "cannot be empty".to_string()));
    }

    if name.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(invalid(name, "cannot start with a digit".to_string()));
    }

    if let Some(ch) = name.chars().find(|c| !c.is_ascii_alphanumeric() && *c != '_') {
        return Err(invalid(name, format!("invalid character {:?}", ch)));
    }

    Ok(())
}

fn invalid(identifier: &str, reason: String) -> crate::error::Error {
    ValidationError::InvalidIdentifier {
        identifier: identifier.to_string(),
        reason,
    }
    .into()
}
