//! `PostgreSQL` repository implementation for user account storage.

use super::{
    models::{NewUserRow, UserRow},
    schema::users,
};
use crate::identity::{
    domain::{
        EmailAddress, Nickname, PersistedUserData, PersonName, Role, User, UserId, UserStatus,
    },
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by identity adapters.
pub type UserPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed user repository.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: UserPgPool,
}

impl PostgresUserRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: UserPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> UserRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> UserRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(UserRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(UserRepositoryError::persistence)?
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn add(&self, user: &User) -> UserRepositoryResult<()> {
        let new_row = to_new_row(user);
        let user_id = user.id().clone();
        let email = user.email().clone();
        let nickname = user.nickname().clone();

        self.run_blocking(move |connection| {
            diesel::insert_into(users::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_constraint(info.as_ref(), "users_email_key") =>
                    {
                        UserRepositoryError::DuplicateEmail(email.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_constraint(info.as_ref(), "users_nickname_key") =>
                    {
                        UserRepositoryError::DuplicateNickname(nickname.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        UserRepositoryError::DuplicateUser(user_id.clone())
                    }
                    _ => UserRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: &UserId) -> UserRepositoryResult<Option<User>> {
        let lookup_id = id.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::id.eq(&lookup_id))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn find_by_login(
        &self,
        email: &EmailAddress,
        nickname: &Nickname,
    ) -> UserRepositoryResult<Option<User>> {
        let lookup_email = email.as_str().to_owned();
        let lookup_nickname = nickname.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::email.eq(&lookup_email))
                .filter(users::nickname.eq(&lookup_nickname))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }
}

fn to_new_row(user: &User) -> NewUserRow {
    NewUserRow {
        id: user.id().as_str().to_owned(),
        email: user.email().as_str().to_owned(),
        nickname: user.nickname().as_str().to_owned(),
        first_name: user.first_name().as_str().to_owned(),
        last_name: user.last_name().as_str().to_owned(),
        role: user.role().as_str().to_owned(),
        status: user.status().as_str().to_owned(),
        created_at: user.created_at(),
        updated_at: user.updated_at(),
    }
}

fn row_to_user(row: UserRow) -> UserRepositoryResult<User> {
    let UserRow {
        id,
        email,
        nickname,
        first_name,
        last_name,
        role,
        status,
        created_at,
        updated_at,
    } = row;

    let data = PersistedUserData {
        id: UserId::new(id).map_err(UserRepositoryError::persistence)?,
        email: EmailAddress::new(email).map_err(UserRepositoryError::persistence)?,
        nickname: Nickname::new(nickname).map_err(UserRepositoryError::persistence)?,
        first_name: PersonName::new(first_name).map_err(UserRepositoryError::persistence)?,
        last_name: PersonName::new(last_name).map_err(UserRepositoryError::persistence)?,
        role: Role::try_from(role.as_str()).map_err(UserRepositoryError::persistence)?,
        status: UserStatus::try_from(status.as_str()).map_err(UserRepositoryError::persistence)?,
        created_at,
        updated_at,
    };
    Ok(User::from_persisted(data))
}

fn is_constraint(info: &dyn DatabaseErrorInformation, name: &str) -> bool {
    info.constraint_name().is_some_and(|value| value == name)
}
