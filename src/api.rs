//! HTTP routes receiving the site's forms.
//!
//! | Route | Form |
//! |---|---|
//! | `POST /api/contact` | [`ContactSubmission`] |
//! | `POST /api/estimate` | [`EstimateSubmission`] |
//! | `POST /api/send-quote` | [`QuoteSubmission`] |
//!
//! The routes are public: no authentication and no rate limiting.
//! Internal failures are logged and answered with a fixed message so no
//! error detail reaches the caller.

use crate::email::{EmailRelay, RelayError};
use crate::forms::{
    ContactSubmission, EstimateSubmission, Form, FormField, QuoteSubmission, SubmissionKind,
};
use crate::validation;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

#[derive(Clone)]
pub struct AppState {
    pub relay: EmailRelay,
}

impl AppState {
    pub fn new(relay: EmailRelay) -> Self {
        Self { relay }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/contact", post(contact))
        .route("/api/estimate", post(estimate))
        .route("/api/send-quote", post(send_quote))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ==================== Response Bodies ====================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SuccessBody {
    success: bool,
    message_id: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// 400 message for a blank required field.
pub fn missing_field_message(kind: SubmissionKind, field: &str) -> String {
    match kind {
        SubmissionKind::Contact => "Tous les champs (nom, email, message) sont requis".to_string(),
        SubmissionKind::Estimate => "Les champs nom, email et description sont requis".to_string(),
        SubmissionKind::Quote => format!("Le champ {} est requis", field),
    }
}

/// 500 message; identical for every internal failure of a kind.
pub fn failure_message(kind: SubmissionKind) -> &'static str {
    match kind {
        SubmissionKind::Contact => "Une erreur est survenue lors de l'envoi du message",
        SubmissionKind::Estimate => "Une erreur est survenue lors de l'envoi de la demande",
        SubmissionKind::Quote => "Une erreur est survenue lors de l'envoi du devis",
    }
}

// ==================== Errors ====================

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{kind} submission missing field '{field}'")]
    MissingField {
        kind: SubmissionKind,
        field: &'static str,
    },

    #[error("{kind} submission has a line break in '{field}'")]
    InvalidHeaderField {
        kind: SubmissionKind,
        field: &'static str,
    },

    #[error("failed to parse {kind} submission: {source}")]
    Parse {
        kind: SubmissionKind,
        source: serde_json::Error,
    },

    #[error("failed to relay {kind} submission: {source}")]
    Relay {
        kind: SubmissionKind,
        source: RelayError,
    },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::MissingField { kind, field } => {
                info!("Rejected submission: {}", self);
                (StatusCode::BAD_REQUEST, missing_field_message(*kind, field))
            }
            ApiError::InvalidHeaderField { field, .. } => {
                info!("Rejected submission: {}", self);
                (
                    StatusCode::BAD_REQUEST,
                    format!("Le champ {} contient des caractères non autorisés", field),
                )
            }
            ApiError::Parse { kind, .. } | ApiError::Relay { kind, .. } => {
                error!("{}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    failure_message(*kind).to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

// ==================== Handlers ====================

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn contact(State(state): State<AppState>, body: Bytes) -> Response {
    respond::<ContactSubmission>(&state, &body).await
}

async fn estimate(State(state): State<AppState>, body: Bytes) -> Response {
    respond::<EstimateSubmission>(&state, &body).await
}

async fn send_quote(State(state): State<AppState>, body: Bytes) -> Response {
    respond::<QuoteSubmission>(&state, &body).await
}

async fn respond<F: Form>(state: &AppState, body: &[u8]) -> Response {
    match process::<F>(state, body).await {
        Ok(message_id) => (
            StatusCode::OK,
            Json(SuccessBody {
                success: true,
                message_id,
            }),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Parse, re-validate and relay one submission. Returns the message id.
async fn process<F: Form>(state: &AppState, body: &[u8]) -> Result<String, ApiError> {
    let kind = F::KIND;

    let form: F = serde_json::from_slice(body).map_err(|source| ApiError::Parse { kind, source })?;

    if let Some(field) = validation::first_missing(&form) {
        return Err(ApiError::MissingField {
            kind,
            field: field.as_str(),
        });
    }

    validation::check_header_fields(&form)
        .map_err(|field| ApiError::InvalidHeaderField {
            kind,
            field: field.as_str(),
        })?;

    let result = state
        .relay
        .send(&form.into_submission())
        .await
        .map_err(|source| ApiError::Relay { kind, source })?;

    Ok(result.message_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_messages() {
        assert_eq!(
            missing_field_message(SubmissionKind::Contact, "name"),
            "Tous les champs (nom, email, message) sont requis"
        );
        assert_eq!(
            missing_field_message(SubmissionKind::Estimate, "description"),
            "Les champs nom, email et description sont requis"
        );
        assert_eq!(
            missing_field_message(SubmissionKind::Quote, "surface"),
            "Le champ surface est requis"
        );
    }

    #[test]
    fn test_failure_messages_are_distinct_per_kind() {
        assert_ne!(
            failure_message(SubmissionKind::Contact),
            failure_message(SubmissionKind::Estimate)
        );
        assert_eq!(
            failure_message(SubmissionKind::Quote),
            "Une erreur est survenue lors de l'envoi du devis"
        );
    }

    #[test]
    fn test_relay_error_maps_to_500() {
        let response = ApiError::Relay {
            kind: SubmissionKind::Estimate,
            source: RelayError::Transport("535 5.7.8 auth rejected".to_string()),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_missing_field_maps_to_400() {
        let response = ApiError::MissingField {
            kind: SubmissionKind::Quote,
            field: "surface",
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
