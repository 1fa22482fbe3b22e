//! Service orchestration tests for registration and login.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use std::sync::Arc;

use crate::identity::{
    adapters::memory::InMemoryUserRepository,
    domain::{IdentityDomainError, Role, UserStatus},
    ports::UserRepositoryError,
    services::{AccountService, AccountServiceError, CreateUserRequest, RegisterUserRequest},
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestService = AccountService<InMemoryUserRepository, DefaultClock>;

#[fixture]
fn service() -> TestService {
    AccountService::new(Arc::new(InMemoryUserRepository::new()), Arc::new(DefaultClock))
}

fn ada_request() -> RegisterUserRequest {
    RegisterUserRequest::new("Ada", "Lovelace", "ada", "ada@example.com")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn register_then_login_round_trips(service: TestService) {
    let registered = service
        .register(ada_request())
        .await
        .expect("registration should succeed");

    let logged_in = service
        .login("ada@example.com", "ada")
        .await
        .expect("login should succeed");

    assert_eq!(logged_in.id(), registered.id());
    assert_eq!(logged_in.role(), Role::User);
    assert_eq!(logged_in.nickname().as_str(), "ada");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn register_rejects_duplicate_nickname(service: TestService) {
    service
        .register(ada_request())
        .await
        .expect("first registration should succeed");

    let duplicate = service
        .register(RegisterUserRequest::new(
            "Augusta",
            "King",
            "ada",
            "augusta@example.com",
        ))
        .await;

    assert!(matches!(
        duplicate,
        Err(AccountServiceError::Repository(
            UserRepositoryError::DuplicateNickname(_)
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn register_rejects_duplicate_email(service: TestService) {
    service
        .register(ada_request())
        .await
        .expect("first registration should succeed");

    let duplicate = service
        .register(RegisterUserRequest::new(
            "Augusta",
            "King",
            "augusta",
            "ada@example.com",
        ))
        .await;

    assert!(matches!(
        duplicate,
        Err(AccountServiceError::Repository(
            UserRepositoryError::DuplicateEmail(_)
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn register_rejects_malformed_email(service: TestService) {
    let result = service
        .register(RegisterUserRequest::new("Ada", "Lovelace", "ada", "not-an-email"))
        .await;

    assert!(matches!(
        result,
        Err(AccountServiceError::Domain(
            IdentityDomainError::InvalidEmail(_)
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn login_with_unknown_pair_fails(service: TestService) {
    service
        .register(ada_request())
        .await
        .expect("registration should succeed");

    let wrong_nickname = service.login("ada@example.com", "lovelace").await;

    assert!(matches!(
        wrong_nickname,
        Err(AccountServiceError::LoginFailed)
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn login_as_blocked_user_fails(service: TestService) {
    service
        .create_user(CreateUserRequest::new(
            "u-blocked",
            "blocked@example.com",
            "blocked_one",
            "Berta",
            "Block",
            "USER",
            "BLOCKED",
        ))
        .await
        .expect("creation should succeed");

    let result = service.login("blocked@example.com", "blocked_one").await;

    assert!(matches!(result, Err(AccountServiceError::LoginFailed)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_user_honours_explicit_role_and_status(service: TestService) {
    let manager = service
        .create_user(CreateUserRequest::new(
            "m1",
            "m@example.com",
            "mm1",
            "Manfred",
            "Manager",
            "MANAGER",
            "ACTIVE",
        ))
        .await
        .expect("creation should succeed");

    assert_eq!(manager.id().as_str(), "m1");
    assert_eq!(manager.role(), Role::Manager);
    assert_eq!(manager.status(), UserStatus::Active);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_user_rejects_unknown_role(service: TestService) {
    let result = service
        .create_user(CreateUserRequest::new(
            "u1",
            "u1@example.com",
            "uu1",
            "User",
            "One",
            "ROOT",
            "ACTIVE",
        ))
        .await;

    assert!(matches!(result, Err(AccountServiceError::UnknownRole(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_user_rejects_duplicate_id(service: TestService) {
    service
        .create_user(CreateUserRequest::new(
            "u1",
            "u1@example.com",
            "uu1",
            "User",
            "One",
            "USER",
            "ACTIVE",
        ))
        .await
        .expect("first creation should succeed");

    let duplicate = service
        .create_user(CreateUserRequest::new(
            "u1",
            "other@example.com",
            "other_nick",
            "User",
            "Two",
            "USER",
            "ACTIVE",
        ))
        .await;

    assert!(matches!(
        duplicate,
        Err(AccountServiceError::Repository(
            UserRepositoryError::DuplicateUser(_)
        ))
    ));
}
