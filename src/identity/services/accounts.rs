//! Service layer for account registration and login.

use crate::identity::{
    domain::{
        EmailAddress, IdentityDomainError, Nickname, ParseRoleError, ParseUserStatusError,
        PersonName, Role, User, UserId, UserProfile, UserStatus,
    },
    ports::{UserRepository, UserRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for self-service registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    first_name: String,
    last_name: String,
    nickname: String,
    email: String,
}

impl RegisterUserRequest {
    /// Creates a registration request from raw input fields.
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        nickname: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            nickname: nickname.into(),
            email: email.into(),
        }
    }
}

/// Request payload for creating a fully-specified user (admin path).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserRequest {
    id: String,
    email: String,
    nickname: String,
    first_name: String,
    last_name: String,
    role: String,
    status: String,
}

impl CreateUserRequest {
    /// Creates an admin user-creation request from raw input fields.
    #[expect(
        clippy::too_many_arguments,
        reason = "creation bundles all mandatory fields for a single domain aggregate"
    )]
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        email: impl Into<String>,
        nickname: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        role: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            nickname: nickname.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            role: role.into(),
            status: status.into(),
        }
    }
}

/// Service-level errors for account operations.
#[derive(Debug, Error)]
pub enum AccountServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] IdentityDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
    /// The role string is not a known role.
    #[error(transparent)]
    UnknownRole(#[from] ParseRoleError),
    /// The status string is not a known status.
    #[error(transparent)]
    UnknownStatus(#[from] ParseUserStatusError),
    /// No active user matches the presented (email, nickname) pair.
    #[error("no matching active user")]
    LoginFailed,
}

/// Result type for account service operations.
pub type AccountServiceResult<T> = Result<T, AccountServiceError>;

/// Account registration and login orchestration service.
#[derive(Clone)]
pub struct AccountService<R, C>
where
    R: UserRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> AccountService<R, C>
where
    R: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new account service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Registers a new user with `USER` role and `ACTIVE` status.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::Domain`] when a field fails
    /// validation, or [`AccountServiceError::Repository`] when the email or
    /// nickname is already taken.
    #[tracing::instrument(skip(self))]
    pub async fn register(&self, request: RegisterUserRequest) -> AccountServiceResult<User> {
        let profile = UserProfile {
            email: EmailAddress::new(request.email)?,
            nickname: Nickname::new(request.nickname)?,
            first_name: PersonName::new(request.first_name)?,
            last_name: PersonName::new(request.last_name)?,
        };
        let user = User::register(profile, &*self.clock);
        self.repository.add(&user).await?;
        Ok(user)
    }

    /// Authenticates by exact (email, nickname) match.
    ///
    /// This is an identity lookup, not a credential check: any holder of a
    /// valid pair authenticates as that user.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::LoginFailed`] when the pair is
    /// malformed, matches no user, or matches a blocked user.
    #[tracing::instrument(skip(self))]
    pub async fn login(&self, email: &str, nickname: &str) -> AccountServiceResult<User> {
        let (Ok(known_email), Ok(known_nickname)) =
            (EmailAddress::new(email), Nickname::new(nickname))
        else {
            // A malformed pair can never match a stored user; report it the
            // same way as a miss.
            return Err(AccountServiceError::LoginFailed);
        };

        self.repository
            .find_by_login(&known_email, &known_nickname)
            .await?
            .filter(User::is_active)
            .ok_or(AccountServiceError::LoginFailed)
    }

    /// Stores a fully-specified user with caller-chosen id, role, and
    /// status.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError`] when a field fails validation or the
    /// id, email, or nickname is already taken.
    #[tracing::instrument(skip(self))]
    pub async fn create_user(&self, request: CreateUserRequest) -> AccountServiceResult<User> {
        let id = UserId::new(request.id)?;
        let profile = UserProfile {
            email: EmailAddress::new(request.email)?,
            nickname: Nickname::new(request.nickname)?,
            first_name: PersonName::new(request.first_name)?,
            last_name: PersonName::new(request.last_name)?,
        };
        let role = Role::try_from(request.role.as_str())?;
        let status = UserStatus::try_from(request.status.as_str())?;

        let user = User::with_id(id, profile, role, status, &*self.clock);
        self.repository.add(&user).await?;
        Ok(user)
    }
}
