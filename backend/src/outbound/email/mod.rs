//! Mailer adapters: SMTP via lettre, plus a log-only sender for development.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, info};

use crate::domain::ports::{MailError, Mailer};

/// SMTP settings for the lettre transport.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    /// Relay host name.
    pub host: String,
    /// Relay account name.
    pub username: String,
    /// Relay account password.
    pub password: String,
    /// Sender address, e.g. `Forum <no-reply@example.com>`.
    pub from: String,
}

/// SMTP implementation of the [`Mailer`] port.
#[derive(Debug)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Build a relay transport from the given settings.
    ///
    /// # Errors
    /// Returns [`MailError::Config`] when the sender address or relay host is
    /// invalid.
    pub fn new(config: SmtpConfig) -> Result<Self, MailError> {
        let from: Mailbox = config
            .from
            .parse()
            .map_err(|err| MailError::config(format!("invalid sender address: {err}")))?;
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
            .map_err(|err| MailError::config(err.to_string()))?
            .credentials(Credentials::new(config.username, config.password))
            .build();

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), MailError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(to
                .parse()
                .map_err(|err| MailError::dispatch(format!("invalid recipient: {err}")))?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_body.to_owned())
            .map_err(|err| MailError::dispatch(err.to_string()))?;

        self.transport
            .send(message)
            .await
            .map(|_| ())
            .map_err(|err| MailError::dispatch(err.to_string()))
    }
}

/// Development sender that logs instead of dispatching.
///
/// The body is logged at debug only; it carries the reset link.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), MailError> {
        info!(to, subject, "email dispatch stub");
        debug!(body = html_body, "stubbed email body");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[tokio::test]
    async fn log_mailer_always_succeeds() {
        let result = LogMailer.send("a@b.com", "subject", "<p>body</p>").await;
        assert!(result.is_ok());
    }

    #[test]
    fn smtp_mailer_rejects_invalid_sender() {
        let err = SmtpMailer::new(SmtpConfig {
            host: "smtp.example.com".to_owned(),
            username: "user".to_owned(),
            password: "pass".to_owned(),
            from: "not an address".to_owned(),
        })
        .expect_err("invalid sender should fail");
        assert!(matches!(err, MailError::Config { .. }));
    }
}
