//! Browser-side half of the pipeline: per-form state and the dispatcher that
//! posts it to the API.

use crate::forms::Form;
use crate::i18n::{LanguageStrings, Locale};
use crate::validation::{self, ValidationErrors};
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Lifecycle of one form's submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Pending,
    Success,
    Error(String),
}

impl SubmissionStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, SubmissionStatus::Pending)
    }
}

/// Values, inline errors and status of one mounted form.
#[derive(Debug, Clone)]
pub struct FormState<F: Form> {
    values: F,
    errors: ValidationErrors<F::Field>,
    status: SubmissionStatus,
}

impl<F: Form> Default for FormState<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Form> FormState<F> {
    pub fn new() -> Self {
        Self {
            values: F::default(),
            errors: ValidationErrors::default(),
            status: SubmissionStatus::Idle,
        }
    }

    pub fn values(&self) -> &F {
        &self.values
    }

    pub fn errors(&self) -> &ValidationErrors<F::Field> {
        &self.errors
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    pub fn set(&mut self, field: F::Field, value: impl Into<String>) {
        self.values.set(field, value.into());
    }

    /// Run the validator, store its result and report whether the form is clean.
    pub fn validate(&mut self, locale: &Locale) -> bool {
        self.errors = validation::validate(&self.values, locale.strings());
        self.errors.is_empty()
    }

    /// Clear values and errors after a successful submission.
    pub fn reset(&mut self) {
        self.values = F::default();
        self.errors = ValidationErrors::default();
    }

    /// Start a submission: validate, mark the form `Pending` and hand back
    /// the payload to post.
    ///
    /// Returns `None` when the form is invalid (status untouched) or when a
    /// submission is already pending, so one form never has two requests
    /// in flight.
    pub fn begin(&mut self, locale: &Locale) -> Option<F> {
        if self.status.is_pending() {
            debug!("{} form already pending, ignoring submit", F::KIND);
            return None;
        }

        if !self.validate(locale) {
            info!(
                "{} form has {} invalid field(s), not sending",
                F::KIND,
                self.errors.len()
            );
            return None;
        }

        self.status = SubmissionStatus::Pending;
        Some(self.values.clone())
    }

    /// Record the outcome of the request started by [`FormState::begin`].
    /// Values are cleared only on success.
    pub fn finish(&mut self, outcome: SubmissionStatus) {
        if outcome == SubmissionStatus::Success {
            self.reset();
        }
        self.status = outcome;
    }

    /// Label of the submit button; switches while a request is in flight.
    pub fn submit_label(&self, strings: &LanguageStrings) -> &'static str {
        if self.status.is_pending() {
            strings.sending_button
        } else {
            strings.submit_button
        }
    }

    /// Banner text for the last outcome, if any.
    pub fn status_message<'a>(&'a self, strings: &LanguageStrings) -> Option<&'a str> {
        match &self.status {
            SubmissionStatus::Success => Some(strings.submit_success),
            SubmissionStatus::Error(message) => Some(message.as_str()),
            SubmissionStatus::Idle | SubmissionStatus::Pending => None,
        }
    }
}

/// JSON envelope returned by the API routes.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiReply {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

/// Posts form values to the site's API.
#[derive(Debug, Clone)]
pub struct SubmissionDispatcher {
    client: reqwest::Client,
    base_url: String,
}

impl SubmissionDispatcher {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url_for<F: Form>(&self) -> String {
        format!("{}{}", self.base_url, F::KIND.endpoint())
    }

    /// Validate and submit `state`, issuing at most one request.
    ///
    /// An invalid or already pending form is not sent and its status is left
    /// as it was. UIs that render while the request is in flight use
    /// [`FormState::begin`], [`SubmissionDispatcher::post`] and
    /// [`FormState::finish`] directly.
    pub async fn submit<F: Form>(
        &self,
        state: &mut FormState<F>,
        locale: &Locale,
    ) -> SubmissionStatus {
        let Some(payload) = state.begin(locale) else {
            return state.status.clone();
        };

        let outcome = self.post(&payload, locale).await;
        state.finish(outcome.clone());
        outcome
    }

    /// POST one payload and map the reply to a status. Never retries.
    pub async fn post<F: Form>(&self, payload: &F, locale: &Locale) -> SubmissionStatus {
        let strings = locale.strings();
        let url = self.url_for::<F>();

        let response = match self.client.post(&url).json(payload).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Failed to reach {}: {}", url, e);
                return SubmissionStatus::Error(strings.connection_error.to_string());
            }
        };

        let status_code = response.status();
        let reply: ApiReply = response.json().await.unwrap_or_default();

        if status_code.is_success() && reply.success {
            info!("{} form submitted", F::KIND);
            SubmissionStatus::Success
        } else {
            warn!("{} form rejected ({}): {:?}", F::KIND, status_code, reply.error);
            SubmissionStatus::Error(
                reply
                    .error
                    .unwrap_or_else(|| strings.submit_failed.to_string()),
            )
        }
    }
}
