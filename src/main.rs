use anyhow::{Context, Result};
use atd_briques::api::{self, AppState};
use atd_briques::config::Config;
use atd_briques::email::EmailRelay;
use atd_briques::smtp::SmtpTransport;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("atd_briques=info".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .init();

    info!("Starting ATD Briques form relay");

    let config = Config::from_env()?;
    info!(
        "Relaying through {}:{} as {}",
        config.relay.smtp_host, config.relay.smtp_port, config.relay.smtp_user
    );
    if config.relay.quote_email.is_none() || config.relay.quote_subject.is_none() {
        tracing::warn!("QUOTE_EMAIL or QUOTE_SUBJECT not set, /api/send-quote will fail");
    }

    let transport = Arc::new(SmtpTransport::new(config.relay.clone()));
    let relay = EmailRelay::new(config.relay.clone(), transport);
    let app = api::router(AppState::new(relay));

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
