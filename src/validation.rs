//! Required-field validation, shared by the browser-side form state and the
//! API routes. The server never trusts the client's pass and runs it again.

use crate::forms::{Form, FormField};
use crate::i18n::LanguageStrings;
use std::collections::BTreeMap;

/// Field -> message. Empty means valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors<F: FormField> {
    errors: BTreeMap<F, String>,
}

impl<F: FormField> Default for ValidationErrors<F> {
    fn default() -> Self {
        Self {
            errors: BTreeMap::new(),
        }
    }
}

impl<F: FormField> ValidationErrors<F> {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: F) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (F, &str)> {
        self.errors.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    fn insert(&mut self, field: F, message: &str) {
        self.errors.insert(field, message.to_string());
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Check every required field of `form` and collect localized messages.
///
/// Only presence is checked; email syntax is left to the input widget.
pub fn validate<F: Form>(form: &F, strings: &LanguageStrings) -> ValidationErrors<F::Field> {
    let mut errors = ValidationErrors::default();

    for field in F::REQUIRED {
        if !is_blank(form.get(*field)) {
            continue;
        }
        if let Some(message) = field.required_message(strings) {
            errors.insert(*field, message);
        }
    }

    errors
}

/// First required field that is blank, in declaration order.
pub fn first_missing<F: Form>(form: &F) -> Option<F::Field> {
    F::REQUIRED
        .iter()
        .copied()
        .find(|field| is_blank(form.get(*field)))
}

/// Whether a value may be placed in a mail header without injecting new lines.
pub fn is_header_safe(value: &str) -> bool {
    !value.contains(['\r', '\n'])
}

/// Reject line breaks in the fields that end up in mail headers.
///
/// Returns the first offending field.
pub fn check_header_fields<F: Form>(form: &F) -> Result<(), F::Field> {
    match F::HEADER
        .iter()
        .copied()
        .find(|field| !is_header_safe(form.get(*field)))
    {
        Some(field) => Err(field),
        None => Ok(()),
    }
}
