//! User account aggregate root.

use super::{EmailAddress, Nickname, PersonName, Role, UserId, UserStatus};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// User account aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    email: EmailAddress,
    nickname: Nickname,
    first_name: PersonName,
    last_name: PersonName,
    role: Role,
    status: UserStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted user aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedUserData {
    /// Persisted user identifier.
    pub id: UserId,
    /// Persisted email address.
    pub email: EmailAddress,
    /// Persisted nickname.
    pub nickname: Nickname,
    /// Persisted first name.
    pub first_name: PersonName,
    /// Persisted last name.
    pub last_name: PersonName,
    /// Persisted role.
    pub role: Role,
    /// Persisted account status.
    pub status: UserStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Validated profile fields shared by registration and admin creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// Email address, unique across users.
    pub email: EmailAddress,
    /// Nickname, unique across users.
    pub nickname: Nickname,
    /// First name.
    pub first_name: PersonName,
    /// Last name.
    pub last_name: PersonName,
}

impl User {
    /// Creates a self-registered user: generated id, `USER` role, `ACTIVE`
    /// status.
    #[must_use]
    pub fn register(profile: UserProfile, clock: &impl Clock) -> Self {
        Self::with_id(UserId::generate(), profile, Role::User, UserStatus::Active, clock)
    }

    /// Creates a user with an explicit id, role, and status (admin path).
    #[must_use]
    pub fn with_id(
        id: UserId,
        profile: UserProfile,
        role: Role,
        status: UserStatus,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id,
            email: profile.email,
            nickname: profile.nickname,
            first_name: profile.first_name,
            last_name: profile.last_name,
            role,
            status,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a user from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            id: data.id,
            email: data.email,
            nickname: data.nickname,
            first_name: data.first_name,
            last_name: data.last_name,
            role: data.role,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Returns the email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the nickname.
    #[must_use]
    pub const fn nickname(&self) -> &Nickname {
        &self.nickname
    }

    /// Returns the first name.
    #[must_use]
    pub const fn first_name(&self) -> &PersonName {
        &self.first_name
    }

    /// Returns the last name.
    #[must_use]
    pub const fn last_name(&self) -> &PersonName {
        &self.last_name
    }

    /// Returns the authorization role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the account status.
    #[must_use]
    pub const fn status(&self) -> UserStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns `true` when the account may authenticate and act.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }
}
