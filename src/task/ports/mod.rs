//! Port contracts for the task module.

mod mailer;
mod repository;

pub use mailer::{HistoryEmail, HistoryMailer, MailerError};
pub use repository::{
    TaskEventRepository, TaskEventRepositoryError, TaskEventRepositoryResult, TaskFilter,
    TaskRepository, TaskRepositoryError, TaskRepositoryResult,
};

#[cfg(test)]
pub use mailer::MockHistoryMailer;
