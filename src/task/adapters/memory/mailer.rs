//! Recording mailer for tests and local runs.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::task::ports::{HistoryEmail, HistoryMailer, MailerError};

/// Mailer that records every email instead of delivering it.
#[derive(Debug, Clone, Default)]
pub struct RecordingHistoryMailer {
    sent: Arc<RwLock<Vec<HistoryEmail>>>,
}

impl RecordingHistoryMailer {
    /// Creates an empty recording mailer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every email recorded so far.
    ///
    /// # Errors
    ///
    /// Returns [`MailerError::Delivery`] when the record lock is poisoned.
    pub fn sent(&self) -> Result<Vec<HistoryEmail>, MailerError> {
        let sent = self
            .sent
            .read()
            .map_err(|err| MailerError::delivery(std::io::Error::other(err.to_string())))?;
        Ok(sent.clone())
    }
}

#[async_trait]
impl HistoryMailer for RecordingHistoryMailer {
    async fn send(&self, email: &HistoryEmail) -> Result<(), MailerError> {
        let mut sent = self
            .sent
            .write()
            .map_err(|err| MailerError::delivery(std::io::Error::other(err.to_string())))?;
        sent.push(email.clone());
        Ok(())
    }
}
