use anyhow::{Context, Result};
use std::fmt;

/// SMTP account and routing used by the email relay.
#[derive(Clone)]
pub struct RelaySettings {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_user: String,
    pub smtp_password: String,

    /// Recipient for contact and estimate mail; `smtp_user` when unset
    pub contact_email: Option<String>,

    // Quote routing has no fallback; sends fail while these are unset
    pub quote_email: Option<String>,
    pub quote_subject: Option<String>,
}

impl RelaySettings {
    /// Address receiving contact and estimate notifications.
    pub fn contact_recipient(&self) -> &str {
        self.contact_email.as_deref().unwrap_or(&self.smtp_user)
    }
}

impl fmt::Debug for RelaySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelaySettings")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_user", &self.smtp_user)
            .field("smtp_password", &"<redacted>")
            .field("contact_email", &self.contact_email)
            .field("quote_email", &self.quote_email)
            .field("quote_subject", &self.quote_subject)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub relay: RelaySettings,

    // Server
    pub bind_address: String,
    pub port: u16,
}

/// Optional, non-empty environment variable.
fn optional_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl RelaySettings {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            smtp_host: std::env::var("SMTP_HOST").context("SMTP_HOST not set")?,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(465),
            smtp_user: std::env::var("SMTP_USER").context("SMTP_USER not set")?,
            smtp_password: std::env::var("SMTP_PASSWORD").context("SMTP_PASSWORD not set")?,
            contact_email: optional_var("CONTACT_EMAIL"),
            quote_email: optional_var("QUOTE_EMAIL"),
            quote_subject: optional_var("QUOTE_SUBJECT"),
        })
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            relay: RelaySettings::from_env()?,
            bind_address: std::env::var("BIND_ADDRESS")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
        })
    }

    /// `host:port` the HTTP server listens on.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}
