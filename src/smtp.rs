use crate::config::RelaySettings;
use crate::email::{EmailEnvelope, EmailResult, MailTransport, RelayError};
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, warn};

/// SMTP delivery over implicit TLS.
///
/// A new connection is opened for every message; nothing is pooled.
pub struct SmtpTransport {
    settings: RelaySettings,
}

impl SmtpTransport {
    pub fn new(settings: RelaySettings) -> Self {
        Self { settings }
    }

    fn connect(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, RelayError> {
        let credentials = Credentials::new(
            self.settings.smtp_user.clone(),
            self.settings.smtp_password.clone(),
        );

        Ok(
            AsyncSmtpTransport::<Tokio1Executor>::relay(&self.settings.smtp_host)
                .map_err(|e| RelayError::Transport(e.to_string()))?
                .port(self.settings.smtp_port)
                .credentials(credentials)
                .build(),
        )
    }
}

fn parse_mailbox(value: &str) -> Result<Mailbox, RelayError> {
    value
        .parse()
        .map_err(|e| RelayError::InvalidAddress(format!("{} ({})", value, e)))
}

/// Convert an envelope into a single-part HTML message.
pub fn build_message(envelope: &EmailEnvelope) -> Result<Message, RelayError> {
    let mut builder = Message::builder()
        .from(parse_mailbox(&envelope.from)?)
        .to(parse_mailbox(&envelope.to)?)
        .subject(envelope.subject.clone())
        .message_id(Some(envelope.message_id.clone()));

    // The submitter's address is unchecked user input; a bad one only costs
    // the Reply-To header, not the notification.
    if let Some(reply_to) = &envelope.reply_to {
        match reply_to.email.parse::<Address>() {
            Ok(address) => {
                let name = Some(reply_to.name.clone()).filter(|n| !n.is_empty());
                builder = builder.reply_to(Mailbox::new(name, address));
            }
            Err(e) => warn!("Skipping Reply-To '{}': {}", reply_to.email, e),
        }
    }

    builder
        .header(ContentType::TEXT_HTML)
        .body(envelope.html_body.clone())
        .map_err(|e| RelayError::Build(e.to_string()))
}

#[async_trait]
impl MailTransport for SmtpTransport {
    async fn send(&self, envelope: &EmailEnvelope) -> Result<EmailResult, RelayError> {
        let message = build_message(envelope)?;
        let transport = self.connect()?;

        debug!(
            "Connecting to {}:{} as {}",
            self.settings.smtp_host, self.settings.smtp_port, self.settings.smtp_user
        );

        let response = transport
            .send(message)
            .await
            .map_err(|e| RelayError::Transport(e.to_string()))?;

        debug!("SMTP server accepted message: {:?}", response.code());

        Ok(EmailResult {
            message_id: envelope.message_id.clone(),
        })
    }
}
