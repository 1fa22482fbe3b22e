//! Log-backed mailer adapter.

use async_trait::async_trait;

use crate::task::ports::{HistoryEmail, HistoryMailer, MailerError};

/// Mailer that emits outbound mail to the structured log.
///
/// Actual delivery is an operational concern outside this service; the log
/// line carries everything a relay needs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingHistoryMailer;

impl TracingHistoryMailer {
    /// Creates a new log-backed mailer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl HistoryMailer for TracingHistoryMailer {
    async fn send(&self, email: &HistoryEmail) -> Result<(), MailerError> {
        tracing::info!(
            to = %email.to,
            subject = %email.subject,
            body = %email.body,
            "outbound task-history email"
        );
        Ok(())
    }
}
