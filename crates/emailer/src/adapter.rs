//! SMTP digest sender.

use async_trait::async_trait;
use feed::EntryResultSet;
use lettre::message::{header, Mailbox};
use lettre::transport::smtp::authentication::{Credentials, Mechanism};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, info};

use crate::config::{ContentType, NotifierConfig, TransportSecurity};
use crate::error::EmailerError;
use crate::render;

/// Sends a digest of feed entries to a single recipient.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Render `entries` and deliver them to `recipient`.
    async fn send_email(
        &self,
        recipient: &str,
        entries: &EntryResultSet,
    ) -> Result<(), EmailerError>;

    /// Subject line for a digest sent now.
    fn subject(&self) -> String;

    /// Body for `entries` in this mailer's content type.
    fn format_body(&self, entries: &EntryResultSet) -> String;
}

/// Digest sender backed by one SMTP session per call.
///
/// Holds only the resolved configuration; each [`Mailer::send_email`] opens
/// its own connection, authenticates with `AUTH PLAIN`, sends and quits.
/// Nothing is retried.
#[derive(Debug, Clone)]
pub struct SmtpNotifier {
    config: NotifierConfig,
}

impl SmtpNotifier {
    #[must_use]
    pub const fn new(config: NotifierConfig) -> Self {
        Self { config }
    }

    /// Create from environment variables.
    pub fn from_env(content_type: ContentType) -> Self {
        Self::new(NotifierConfig::from_env(content_type))
    }

    #[must_use]
    pub const fn config(&self) -> &NotifierConfig {
        &self.config
    }

    /// Render and assemble the message for `recipient` without sending it.
    pub fn build_message(
        &self,
        recipient: &str,
        entries: &EntryResultSet,
    ) -> Result<Message, EmailerError> {
        self.build_message_with_subject(recipient, entries, &self.subject())
    }

    /// Same as [`Self::build_message`] with an explicit subject line.
    pub fn build_message_with_subject(
        &self,
        recipient: &str,
        entries: &EntryResultSet,
        subject: &str,
    ) -> Result<Message, EmailerError> {
        let body = self.format_body(entries);

        let from: Mailbox = self
            .config
            .email()
            .parse()
            .map_err(|source| EmailerError::InvalidAddress {
                field: "sender",
                source,
            })?;

        let to: Mailbox = recipient
            .parse()
            .map_err(|source| EmailerError::InvalidAddress {
                field: "recipient",
                source,
            })?;

        let content_type = match self.config.content_type() {
            ContentType::Html => header::ContentType::TEXT_HTML,
            ContentType::Plain => header::ContentType::TEXT_PLAIN,
        };

        let message = Message::builder()
            .from(from)
            .to(to)
            .subject(subject)
            .header(content_type)
            .body(body)?;

        Ok(message)
    }

    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, EmailerError> {
        let server = self.config.server();
        let builder = match self.config.security() {
            TransportSecurity::StartTls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(server)?
            }
            TransportSecurity::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(server)?,
            TransportSecurity::None => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(server),
        };

        let credentials = Credentials::new(
            self.config.email().to_string(),
            self.config.password().to_string(),
        );

        Ok(builder
            .port(self.config.port())
            .credentials(credentials)
            .authentication(vec![Mechanism::Plain])
            .build())
    }
}

#[async_trait]
impl Mailer for SmtpNotifier {
    async fn send_email(
        &self,
        recipient: &str,
        entries: &EntryResultSet,
    ) -> Result<(), EmailerError> {
        let subject = self.subject();
        let message = self.build_message_with_subject(recipient, entries, &subject)?;
        let mailer = self.transport()?;

        debug!(
            server = self.config.server(),
            port = self.config.port(),
            security = ?self.config.security(),
            "Sending digest over SMTP"
        );

        mailer.send(message).await?;

        info!(
            to = recipient,
            entries = entries.len(),
            content_type = %self.config.content_type(),
            subject = %subject,
            "Digest email sent"
        );

        Ok(())
    }

    fn subject(&self) -> String {
        render::subject()
    }

    fn format_body(&self, entries: &EntryResultSet) -> String {
        render::format_body(self.config.content_type(), entries)
    }
}
