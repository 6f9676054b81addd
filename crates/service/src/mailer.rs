//! Outbound mail behind a trait so handlers and tests never touch SMTP
//! directly. Booking and enrollment notifications are fire-and-forget.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use lettre::{
    transport::smtp::authentication::Credentials, AsyncSmtpTransport, AsyncTransport, Message,
    Tokio1Executor,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("mail not configured")]
    NotConfigured,

    #[error("invalid address: {0}")]
    Address(String),

    #[error("send failed: {0}")]
    Send(String),
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError>;
}

/// SMTP with STARTTLS, credentials from config.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl SmtpMailer {
    pub fn from_config(cfg: &configs::EmailConfig) -> Result<Self, MailError> {
        if !cfg.is_configured() {
            return Err(MailError::NotConfigured);
        }
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&cfg.smtp_host)
            .map_err(|e| MailError::Send(e.to_string()))?
            .credentials(Credentials::new(cfg.user.clone(), cfg.pass.clone()))
            .build();
        Ok(Self { transport, from: cfg.user.clone() })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
        let message = Message::builder()
            .from(self.from.parse().map_err(|_| MailError::Address(self.from.clone()))?)
            .to(to.parse().map_err(|_| MailError::Address(to.to_string()))?)
            .subject(subject)
            .body(body.to_string())
            .map_err(|e| MailError::Send(e.to_string()))?;
        self.transport.send(message).await.map_err(|e| MailError::Send(e.to_string()))?;
        Ok(())
    }
}

/// Stand-in when no credentials are configured; logs and drops the mail.
pub struct NoopMailer;

#[async_trait]
impl Mailer for NoopMailer {
    async fn send(&self, to: &str, subject: &str, _body: &str) -> Result<(), MailError> {
        tracing::debug!(%to, %subject, "mail skipped, no credentials configured");
        Ok(())
    }
}

/// Captures outbound mail for assertions in tests.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<SentMail>>,
}

#[derive(Clone, Debug)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

/// Sends in the background. Notification mail must never fail the request
/// that triggered it, so errors are only logged.
pub fn spawn_notify(mailer: Arc<dyn Mailer>, to: String, subject: String, body: String) {
    tokio::spawn(async move {
        if let Err(e) = mailer.send(&to, &subject, &body).await {
            tracing::error!(error = %e, %to, "notification email failed");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn recording_mailer_captures_messages() {
        let mailer = RecordingMailer::default();
        mailer.send("a@b.c", "Hello", "Body").await.unwrap();
        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "a@b.c");
        assert_eq!(sent[0].subject, "Hello");
    }

    #[tokio::test]
    async fn spawn_notify_does_not_block_caller() {
        let mailer: Arc<dyn Mailer> = Arc::new(NoopMailer);
        spawn_notify(mailer, "a@b.c".into(), "Subject".into(), "Body".into());
        // The spawned task owns the mail; nothing to await here.
    }
}
