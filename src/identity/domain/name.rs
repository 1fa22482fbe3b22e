//! Validated personal name type.

use super::IdentityDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a first or last name.
const MAX_NAME_LENGTH: usize = 50;

/// Validated first or last name.
///
/// Accepts letters in any script plus spaces, apostrophes, and hyphens, so
/// names like `O'Neill` or `Anne-Marie` pass.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonName(String);

impl PersonName {
    /// Creates a validated personal name.
    ///
    /// The input is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::InvalidPersonName`] when the value is
    /// empty after trimming, exceeds 50 characters, or contains characters
    /// other than letters, spaces, apostrophes, or hyphens.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityDomainError> {
        let raw = value.into();
        let normalized = raw.trim();

        let length_ok = !normalized.is_empty() && normalized.chars().count() <= MAX_NAME_LENGTH;
        let charset_ok = normalized
            .chars()
            .all(|c| c.is_alphabetic() || c == ' ' || c == '\'' || c == '-');

        if length_ok && charset_ok {
            Ok(Self(normalized.to_owned()))
        } else {
            Err(IdentityDomainError::InvalidPersonName(raw))
        }
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
