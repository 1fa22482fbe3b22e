//! Outbound mail port for task-history delivery.

use crate::identity::domain::EmailAddress;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// A rendered task-history email ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEmail {
    /// Recipient address.
    pub to: EmailAddress,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
}

/// Errors returned by mailer implementations.
#[derive(Debug, Clone, Error)]
pub enum MailerError {
    /// The mail could not be handed to the delivery channel.
    #[error("mail delivery failed: {0}")]
    Delivery(Arc<dyn std::error::Error + Send + Sync>),
}

impl MailerError {
    /// Wraps a delivery error.
    pub fn delivery(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Delivery(Arc::new(err))
    }
}

/// Delivery contract for task-history emails.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HistoryMailer: Send + Sync {
    /// Delivers a rendered history email.
    async fn send(&self, email: &HistoryEmail) -> Result<(), MailerError>;
}
