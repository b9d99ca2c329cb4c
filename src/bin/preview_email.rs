//! Preview binary - renders the notification email of a sample submission
//! without connecting to the SMTP server.
//!
//! Usage:
//!   cargo run --bin preview                # contact form
//!   cargo run --bin preview -- estimate    # estimate modal
//!   cargo run --bin preview -- quote       # quote form
//!
//! Optional environment variables:
//! - SMTP_USER (defaults to contact@example.com)
//! - CONTACT_EMAIL
//! - QUOTE_EMAIL / QUOTE_SUBJECT (placeholders are used when unset)

use anyhow::{bail, Context, Result};
use atd_briques::config::RelaySettings;
use atd_briques::email::build_envelope;
use atd_briques::forms::{
    ContactSubmission, EstimateSubmission, FormSubmission, QuoteSubmission,
};
use chrono::Utc;
use tracing::info;

/// Relay settings good enough to build an envelope (nothing is sent)
fn preview_settings() -> RelaySettings {
    let var = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());

    RelaySettings {
        smtp_host: "unused".to_string(),
        smtp_port: 465,
        smtp_user: var("SMTP_USER").unwrap_or_else(|| "contact@example.com".to_string()),
        smtp_password: "unused".to_string(),
        contact_email: var("CONTACT_EMAIL"),
        quote_email: var("QUOTE_EMAIL").or_else(|| Some("devis@example.com".to_string())),
        quote_subject: var("QUOTE_SUBJECT")
            .or_else(|| Some("Nouvelle demande de devis".to_string())),
    }
}

fn sample_submission(kind: &str) -> Result<FormSubmission> {
    let submission = match kind {
        "contact" => FormSubmission::Contact(ContactSubmission {
            name: "Jean Dupont".to_string(),
            email: "jean@example.com".to_string(),
            message: "Bonjour,\nJe souhaiterais des informations sur vos services.".to_string(),
        }),
        "estimate" => FormSubmission::Estimate(EstimateSubmission {
            name: "Marie Martin".to_string(),
            email: "marie@example.com".to_string(),
            description: "Rénovation d'une façade en briques, environ 80 m².".to_string(),
            phone: "06 01 02 03 04".to_string(),
            company: "Martin & Fils".to_string(),
        }),
        "quote" => FormSubmission::Quote(QuoteSubmission {
            name: "Paul Bernard".to_string(),
            email: "paul@example.com".to_string(),
            phone: "06 05 06 07 08".to_string(),
            message: "Construction d'un muret de clôture.".to_string(),
            address: "12 rue des Tuileries, Lyon".to_string(),
            surface: "25 m²".to_string(),
        }),
        other => bail!("Unknown form kind '{}'. Expected contact, estimate or quote", other),
    };
    Ok(submission)
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("atd_briques=info".parse()?),
        )
        .init();

    let kind = std::env::args().nth(1).unwrap_or_else(|| "contact".to_string());
    let submission = sample_submission(&kind)?;

    info!("Rendering {} email preview", submission.kind());

    let envelope = build_envelope(&preview_settings(), &submission)
        .context("Failed to build envelope")?;

    println!("{}", "=".repeat(60));
    println!("Preview generated {}", Utc::now().format("%Y-%m-%d %H:%M UTC"));
    println!("{}", "=".repeat(60));
    println!("From:       {}", envelope.from);
    println!("To:         {}", envelope.to);
    if let Some(reply_to) = &envelope.reply_to {
        println!("Reply-To:   {} <{}>", reply_to.name, reply_to.email);
    }
    println!("Subject:    {}", envelope.subject);
    println!("Message-ID: {}", envelope.message_id);
    println!("{}", "-".repeat(60));
    println!("{}", envelope.html_body);

    Ok(())
}
