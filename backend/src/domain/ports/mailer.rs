//! Port abstraction for outbound e-mail dispatch.

use async_trait::async_trait;

/// Errors raised by mailer adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MailError {
    /// Transport could not be configured.
    #[error("mail transport configuration failed: {message}")]
    Config {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// Message handoff to the transport failed.
    #[error("mail dispatch failed: {message}")]
    Dispatch {
        /// Adapter-supplied failure description.
        message: String,
    },
}

impl MailError {
    /// Build a [`MailError::Config`] error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Build a [`MailError::Dispatch`] error.
    pub fn dispatch(message: impl Into<String>) -> Self {
        Self::Dispatch {
            message: message.into(),
        }
    }
}

/// Driven port for e-mail dispatch.
///
/// Callers log failures and move on; delivery outcomes are never surfaced to
/// the requesting client.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send an HTML message to a single recipient.
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), MailError>;
}
