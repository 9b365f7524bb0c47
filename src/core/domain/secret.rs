//! Secret entry type.
//!
//! One `IDENTIFIER=VALUE` pair read from the secrets file.

use zeroize::Zeroizing;

/// A secret identifier and the plaintext value to upload as its next version.
///
/// The value is wiped from memory on drop and redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretEntry {
    identifier: String,
    value: Zeroizing<String>,
}

impl SecretEntry {
    /// Create a new entry from an identifier and plaintext value
    pub fn new(identifier: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            value: Zeroizing::new(value.into()),
        }
    }

    /// Secret identifier in the store
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Plaintext value
    pub fn value(&self) -> &str {
        self.value.as_str()
    }
}

impl std::fmt::Debug for SecretEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretEntry")
            .field("identifier", &self.identifier)
            .field("value", &"<redacted>")
            .finish()
    }
}

impl std::fmt::Display for SecretEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.identifier)
    }
}
