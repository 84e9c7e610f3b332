pub mod error;
pub mod templates;

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::SmtpConfig;
use crate::models::Submission;

pub use error::NotifyError;

/// Outbound notification for an accepted contact submission.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, submission: &Submission) -> Result<(), NotifyError>;
}

pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpNotifier {
    pub fn new(config: &SmtpConfig) -> Result<Self, String> {
        let creds = Credentials::new(config.user.clone(), config.pass.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| format!("SMTP relay error: {e}"))?
            .port(config.port)
            .credentials(creds)
            .build();

        Ok(Self {
            transport,
            from: config
                .user
                .parse()
                .map_err(|e| format!("Invalid EMAIL_USER address: {e}"))?,
            to: config
                .to
                .parse()
                .map_err(|e| format!("Invalid EMAIL_TO address: {e}"))?,
        })
    }

    /// Check that the relay accepts a connection and our credentials.
    pub async fn verify(&self) -> Result<(), NotifyError> {
        match self.transport.test_connection().await {
            Ok(true) => Ok(()),
            Ok(false) => Err(NotifyError::Connection(
                "relay did not accept the connection".to_string(),
            )),
            Err(e) => Err(NotifyError::from(&e)),
        }
    }

    /// Build the notification email. Reply-To points at the submitter so the
    /// operator can answer directly.
    pub fn compose(&self, submission: &Submission) -> Result<Message, NotifyError> {
        let html = templates::render_contact_html(submission)
            .map_err(|e| NotifyError::Other(format!("Failed to render email: {e}")))?;
        let text = templates::render_contact_text(submission)
            .map_err(|e| NotifyError::Other(format!("Failed to render email: {e}")))?;

        let mut builder = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(format!("New Contact Form Message from {}", submission.name));

        match submission.email.parse::<Mailbox>() {
            Ok(reply_to) => builder = builder.reply_to(reply_to),
            Err(e) => tracing::warn!(
                "Submission {} has an address lettre cannot use as Reply-To: {e}",
                submission.id
            ),
        }

        builder
            .multipart(MultiPart::alternative_plain_html(text, html))
            .map_err(|e| NotifyError::Other(format!("Failed to build email: {e}")))
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn notify(&self, submission: &Submission) -> Result<(), NotifyError> {
        let message = self.compose(submission)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| NotifyError::from(&e))?;

        Ok(())
    }
}
