//! Error types for identity domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing identity domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityDomainError {
    /// The user identifier is empty after trimming.
    #[error("user id must not be empty")]
    EmptyUserId,

    /// The email address does not follow `local@domain.tld` shape.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// The nickname violates the 3-32 character `[A-Za-z0-9_-]` rule.
    #[error("invalid nickname '{0}', expected 3-32 letters, digits, '_' or '-'")]
    InvalidNickname(String),

    /// The personal name is empty, too long, or contains invalid characters.
    #[error("invalid name '{0}', expected 1-50 letters, spaces, apostrophes or hyphens")]
    InvalidPersonName(String),
}

/// Error returned while parsing user roles from persistence or input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);

/// Error returned while parsing user statuses from persistence or input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown user status: {0}")]
pub struct ParseUserStatusError(pub String);
