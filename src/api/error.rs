//! Error mapping for the HTTP boundary.
//!
//! Every failure surfaces as a JSON object with a single `message` field;
//! the status code carries the class of the failure. Internal faults are
//! logged and reported generically.

use crate::identity::{ports::UserRepositoryError, services::AccountServiceError};
use crate::task::{
    domain::TaskDomainError,
    ports::TaskRepositoryError,
    services::TaskLifecycleError,
};
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// A failure ready to be rendered to the client.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Creates an error with an explicit status code.
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Creates a 400 Bad Request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
    }

    /// Returns the HTTP status code.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "message": self.message }))).into_response()
    }
}

impl From<AccountServiceError> for ApiError {
    fn from(err: AccountServiceError) -> Self {
        match err {
            AccountServiceError::Domain(_)
            | AccountServiceError::UnknownRole(_)
            | AccountServiceError::UnknownStatus(_) => {
                Self::new(StatusCode::BAD_REQUEST, err.to_string())
            }
            AccountServiceError::LoginFailed => Self::new(StatusCode::NOT_FOUND, err.to_string()),
            AccountServiceError::Repository(repo_err) => match repo_err {
                UserRepositoryError::DuplicateUser(_)
                | UserRepositoryError::DuplicateEmail(_)
                | UserRepositoryError::DuplicateNickname(_) => {
                    Self::new(StatusCode::CONFLICT, repo_err.to_string())
                }
                UserRepositoryError::Persistence(_) => {
                    tracing::error!(error = %repo_err, "user persistence failure");
                    Self::internal()
                }
            },
        }
    }
}

impl From<TaskLifecycleError> for ApiError {
    fn from(err: TaskLifecycleError) -> Self {
        match err {
            TaskLifecycleError::Domain(ref domain_err) => match domain_err {
                TaskDomainError::NotAssignee { .. } => {
                    Self::new(StatusCode::FORBIDDEN, err.to_string())
                }
                TaskDomainError::EmptyTitle
                | TaskDomainError::TitleTooLong(_)
                | TaskDomainError::InvalidStatusTransition { .. }
                | TaskDomainError::TerminalTask { .. } => {
                    Self::new(StatusCode::BAD_REQUEST, err.to_string())
                }
            },
            TaskLifecycleError::UnknownStatus(_)
            | TaskLifecycleError::UnknownPriority(_)
            | TaskLifecycleError::InvalidRecipient(_) => {
                Self::new(StatusCode::BAD_REQUEST, err.to_string())
            }
            TaskLifecycleError::TaskNotFound(_)
            | TaskLifecycleError::ActorNotFound(_)
            | TaskLifecycleError::AssigneeNotFound(_) => {
                Self::new(StatusCode::NOT_FOUND, err.to_string())
            }
            TaskLifecycleError::ActorBlocked(_)
            | TaskLifecycleError::AssigneeBlocked(_)
            | TaskLifecycleError::EditForbidden(_) => {
                Self::new(StatusCode::FORBIDDEN, err.to_string())
            }
            TaskLifecycleError::Tasks(ref repo_err) => match repo_err {
                TaskRepositoryError::StaleVersion(_) | TaskRepositoryError::DuplicateTask(_) => {
                    Self::new(StatusCode::CONFLICT, err.to_string())
                }
                TaskRepositoryError::NotFound(_) => {
                    Self::new(StatusCode::NOT_FOUND, err.to_string())
                }
                TaskRepositoryError::Persistence(_) => {
                    tracing::error!(error = %err, "task persistence failure");
                    Self::internal()
                }
            },
            TaskLifecycleError::Users(UserRepositoryError::DuplicateUser(_))
            | TaskLifecycleError::Users(UserRepositoryError::DuplicateEmail(_))
            | TaskLifecycleError::Users(UserRepositoryError::DuplicateNickname(_)) => {
                Self::new(StatusCode::CONFLICT, err.to_string())
            }
            TaskLifecycleError::Users(UserRepositoryError::Persistence(_))
            | TaskLifecycleError::Events(_)
            | TaskLifecycleError::Mail(_)
            | TaskLifecycleError::Template(_) => {
                tracing::error!(error = %err, "task lifecycle failure");
                Self::internal()
            }
        }
    }
}
