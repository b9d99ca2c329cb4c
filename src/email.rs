//! Email relay: turns a validated submission into one outgoing email.
//!
//! The relay decides *what* is sent (recipient, subject, body, ids); the
//! [`MailTransport`] decides *how*. Production uses
//! [`SmtpTransport`](crate::smtp::SmtpTransport); tests plug in a recorder.

use crate::config::RelaySettings;
use crate::forms::{FormSubmission, SubmissionKind};
use crate::templates;
use crate::validation::is_header_safe;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

pub const CONTACT_SUBJECT: &str = "Nouveau message de contact - ATD Briques";
pub const ESTIMATE_SUBJECT: &str = "Nouvelle demande d'estimation - ATD Briques";

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("missing relay configuration: {0}")]
    MissingConfig(&'static str),

    #[error("invalid email address: {0}")]
    InvalidAddress(String),

    #[error("line break in header field '{0}'")]
    HeaderInjection(&'static str),

    #[error("failed to build message: {0}")]
    Build(String),

    #[error("SMTP error: {0}")]
    Transport(String),
}

/// Submitter's mailbox, set as Reply-To on the notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyTo {
    pub name: String,
    pub email: String,
}

/// Everything needed for one send. Built per call, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailEnvelope {
    pub from: String,
    pub to: String,
    pub reply_to: Option<ReplyTo>,
    pub subject: String,
    pub html_body: String,
    /// `<uuid@domain>` Message-ID header value
    pub message_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailResult {
    pub message_id: String,
}

/// Delivery of a fully built envelope.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, envelope: &EmailEnvelope) -> Result<EmailResult, RelayError>;
}

#[derive(Clone)]
pub struct EmailRelay {
    settings: RelaySettings,
    transport: Arc<dyn MailTransport>,
}

impl EmailRelay {
    pub fn new(settings: RelaySettings, transport: Arc<dyn MailTransport>) -> Self {
        Self {
            settings,
            transport,
        }
    }

    /// Send the notification email for `submission`.
    ///
    /// Failures are logged here with full detail; callers only need to map
    /// them to a generic response.
    pub async fn send(&self, submission: &FormSubmission) -> Result<EmailResult, RelayError> {
        let kind = submission.kind();

        let envelope = match build_envelope(&self.settings, submission) {
            Ok(envelope) => envelope,
            Err(e) => {
                error!("Failed to prepare {} email: {}", kind, e);
                return Err(e);
            }
        };

        match self.transport.send(&envelope).await {
            Ok(result) => {
                info!("{} email sent: {}", kind, result.message_id);
                Ok(result)
            }
            Err(e) => {
                error!("Failed to send {} email to {}: {}", kind, envelope.to, e);
                Err(e)
            }
        }
    }
}

/// Build the envelope for a submission without sending it.
pub fn build_envelope(
    settings: &RelaySettings,
    submission: &FormSubmission,
) -> Result<EmailEnvelope, RelayError> {
    if !is_header_safe(submission.name()) {
        return Err(RelayError::HeaderInjection("name"));
    }
    if !is_header_safe(submission.email()) {
        return Err(RelayError::HeaderInjection("email"));
    }

    let (to, subject) = match submission.kind() {
        SubmissionKind::Contact => (
            settings.contact_recipient().to_string(),
            CONTACT_SUBJECT.to_string(),
        ),
        SubmissionKind::Estimate => (
            settings.contact_recipient().to_string(),
            ESTIMATE_SUBJECT.to_string(),
        ),
        SubmissionKind::Quote => {
            let to = settings
                .quote_email
                .clone()
                .ok_or(RelayError::MissingConfig("QUOTE_EMAIL"))?;
            let subject = settings
                .quote_subject
                .clone()
                .ok_or(RelayError::MissingConfig("QUOTE_SUBJECT"))?;
            if !is_header_safe(&subject) {
                return Err(RelayError::HeaderInjection("subject"));
            }
            (to, subject)
        }
    };

    let email = submission.email().trim();
    let reply_to = (!email.is_empty()).then(|| ReplyTo {
        name: submission.name().trim().to_string(),
        email: email.to_string(),
    });

    Ok(EmailEnvelope {
        from: settings.smtp_user.clone(),
        to,
        reply_to,
        subject,
        html_body: templates::render(submission),
        message_id: new_message_id(&settings.smtp_user),
    })
}

/// Fresh Message-ID in the sender's domain.
fn new_message_id(from: &str) -> String {
    let domain = from
        .rsplit_once('@')
        .map(|(_, domain)| domain)
        .filter(|domain| !domain.is_empty())
        .unwrap_or("localhost");
    format!("<{}@{}>", Uuid::new_v4(), domain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::{ContactSubmission, EstimateSubmission, QuoteSubmission};
    use std::sync::Mutex;

    // ==================== Helper Functions ====================

    fn settings() -> RelaySettings {
        RelaySettings {
            smtp_host: "smtp.example.com".to_string(),
            smtp_port: 465,
            smtp_user: "contact@atd-briques.fr".to_string(),
            smtp_password: "secret".to_string(),
            contact_email: None,
            quote_email: Some("devis@atd-briques.fr".to_string()),
            quote_subject: Some("Demande de devis".to_string()),
        }
    }

    fn contact() -> FormSubmission {
        FormSubmission::Contact(ContactSubmission {
            name: "Jean Dupont".to_string(),
            email: "jean@example.com".to_string(),
            message: "Bonjour".to_string(),
        })
    }

    fn quote() -> FormSubmission {
        FormSubmission::Quote(QuoteSubmission {
            name: "Jean Dupont".to_string(),
            email: "jean@example.com".to_string(),
            phone: "0601020304".to_string(),
            message: "Terrasse".to_string(),
            address: "1 rue des Briques".to_string(),
            surface: "40".to_string(),
        })
    }

    #[derive(Default)]
    struct RecordingTransport {
        sent: Mutex<Vec<EmailEnvelope>>,
        fail: bool,
    }

    #[async_trait]
    impl MailTransport for RecordingTransport {
        async fn send(&self, envelope: &EmailEnvelope) -> Result<EmailResult, RelayError> {
            if self.fail {
                return Err(RelayError::Transport("535 authentication failed".to_string()));
            }
            self.sent.lock().unwrap().push(envelope.clone());
            Ok(EmailResult {
                message_id: envelope.message_id.clone(),
            })
        }
    }

    // ==================== build_envelope Tests ====================

    #[test]
    fn test_contact_routes_to_operator() {
        let envelope = build_envelope(&settings(), &contact()).unwrap();

        assert_eq!(envelope.from, "contact@atd-briques.fr");
        assert_eq!(envelope.to, "contact@atd-briques.fr");
        assert_eq!(envelope.subject, CONTACT_SUBJECT);
        assert!(envelope.html_body.contains("Jean Dupont"));
    }

    #[test]
    fn test_contact_recipient_override() {
        let mut settings = settings();
        settings.contact_email = Some("bureau@atd-briques.fr".to_string());

        let envelope = build_envelope(&settings, &contact()).unwrap();
        assert_eq!(envelope.to, "bureau@atd-briques.fr");
        assert_eq!(envelope.from, "contact@atd-briques.fr");
    }

    #[test]
    fn test_estimate_subject() {
        let estimate = FormSubmission::Estimate(EstimateSubmission {
            name: "Jean".to_string(),
            email: "jean@example.com".to_string(),
            description: "Muret".to_string(),
            ..Default::default()
        });

        let envelope = build_envelope(&settings(), &estimate).unwrap();
        assert_eq!(envelope.subject, ESTIMATE_SUBJECT);
        assert_eq!(envelope.to, "contact@atd-briques.fr");
    }

    #[test]
    fn test_quote_uses_configured_routing() {
        let envelope = build_envelope(&settings(), &quote()).unwrap();
        assert_eq!(envelope.to, "devis@atd-briques.fr");
        assert_eq!(envelope.subject, "Demande de devis");
    }

    #[test]
    fn test_quote_without_recipient_fails() {
        let mut settings = settings();
        settings.quote_email = None;

        let err = build_envelope(&settings, &quote()).unwrap_err();
        assert!(matches!(err, RelayError::MissingConfig("QUOTE_EMAIL")));
    }

    #[test]
    fn test_quote_without_subject_fails() {
        let mut settings = settings();
        settings.quote_subject = None;

        let err = build_envelope(&settings, &quote()).unwrap_err();
        assert!(matches!(err, RelayError::MissingConfig("QUOTE_SUBJECT")));
    }

    #[test]
    fn test_reply_to_is_submitter() {
        let envelope = build_envelope(&settings(), &contact()).unwrap();
        assert_eq!(
            envelope.reply_to,
            Some(ReplyTo {
                name: "Jean Dupont".to_string(),
                email: "jean@example.com".to_string(),
            })
        );
    }

    #[test]
    fn test_header_injection_is_refused() {
        let submission = FormSubmission::Contact(ContactSubmission {
            name: "Jean\r\nBcc: everyone@example.com".to_string(),
            email: "jean@example.com".to_string(),
            message: "Bonjour".to_string(),
        });

        let err = build_envelope(&settings(), &submission).unwrap_err();
        assert!(matches!(err, RelayError::HeaderInjection("name")));
    }

    #[test]
    fn test_message_ids_are_unique_and_scoped() {
        let first = build_envelope(&settings(), &contact()).unwrap();
        let second = build_envelope(&settings(), &contact()).unwrap();

        assert_ne!(first.message_id, second.message_id);
        assert!(first.message_id.starts_with('<'));
        assert!(first.message_id.ends_with("@atd-briques.fr>"));
    }

    #[test]
    fn test_message_id_without_domain() {
        assert!(new_message_id("operator").ends_with("@localhost>"));
    }

    // ==================== EmailRelay Tests ====================

    #[tokio::test]
    async fn test_relay_sends_through_transport() {
        let transport = Arc::new(RecordingTransport::default());
        let relay = EmailRelay::new(settings(), transport.clone());

        let result = relay.send(&contact()).await.expect("Should send");

        let sent = transport.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(result.message_id, sent[0].message_id);
    }

    #[tokio::test]
    async fn test_relay_propagates_transport_error() {
        let transport = Arc::new(RecordingTransport {
            fail: true,
            ..Default::default()
        });
        let relay = EmailRelay::new(settings(), transport);

        let err = relay.send(&contact()).await.unwrap_err();
        assert!(matches!(err, RelayError::Transport(_)));
    }

    #[tokio::test]
    async fn test_relay_does_not_call_transport_on_config_error() {
        let transport = Arc::new(RecordingTransport::default());
        let mut settings = settings();
        settings.quote_subject = None;
        let relay = EmailRelay::new(settings, transport.clone());

        assert!(relay.send(&quote()).await.is_err());
        assert!(transport.sent.lock().unwrap().is_empty());
    }
}
