//! Validated nickname type.

use super::IdentityDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum nickname length.
const MIN_NICKNAME_LENGTH: usize = 3;
/// Maximum nickname length.
const MAX_NICKNAME_LENGTH: usize = 32;

/// Validated unique handle for a user.
///
/// Nicknames are 3-32 characters of `[A-Za-z0-9_-]` and are matched
/// case-sensitively at login.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Nickname(String);

impl Nickname {
    /// Creates a validated nickname.
    ///
    /// The input is trimmed; case is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::InvalidNickname`] when the value is
    /// outside 3-32 characters or contains characters other than ASCII
    /// letters, digits, `_`, or `-`.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityDomainError> {
        let raw = value.into();
        let normalized = raw.trim();

        let length_ok =
            normalized.len() >= MIN_NICKNAME_LENGTH && normalized.len() <= MAX_NICKNAME_LENGTH;
        let charset_ok = normalized
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

        if length_ok && charset_ok {
            Ok(Self(normalized.to_owned()))
        } else {
            Err(IdentityDomainError::InvalidNickname(raw))
        }
    }

    /// Returns the nickname as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Nickname {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Nickname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
