//! Repository port for user account persistence and lookup.

use crate::identity::domain::{EmailAddress, Nickname, User, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for user repository operations.
pub type UserRepositoryResult<T> = Result<T, UserRepositoryError>;

/// User persistence contract.
///
/// Implementations own the uniqueness guarantees for email and nickname;
/// [`add`](UserRepository::add) is the single enforcement point.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a new user.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::DuplicateUser`] when the id already
    /// exists, [`UserRepositoryError::DuplicateEmail`] or
    /// [`UserRepositoryError::DuplicateNickname`] when either unique
    /// attribute is already taken.
    async fn add(&self, user: &User) -> UserRepositoryResult<()>;

    /// Finds a user by identifier.
    ///
    /// Returns `None` when the user does not exist.
    async fn find_by_id(&self, id: &UserId) -> UserRepositoryResult<Option<User>>;

    /// Finds a user by the exact (email, nickname) pair.
    ///
    /// Returns `None` when no user matches both attributes.
    async fn find_by_login(
        &self,
        email: &EmailAddress,
        nickname: &Nickname,
    ) -> UserRepositoryResult<Option<User>>;
}

/// Errors returned by user repository implementations.
#[derive(Debug, Clone, Error)]
pub enum UserRepositoryError {
    /// A user with the same identifier already exists.
    #[error("duplicate user id: {0}")]
    DuplicateUser(UserId),

    /// A user with the same email already exists.
    #[error("email already registered: {0}")]
    DuplicateEmail(EmailAddress),

    /// A user with the same nickname already exists.
    #[error("nickname already taken: {0}")]
    DuplicateNickname(Nickname),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
