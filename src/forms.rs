//! Form submissions: one named-field struct per form on the site.
//!
//! Every field is text. Optional fields hold the empty string when absent,
//! so a missing value can never leak into an email as a placeholder word.

use crate::i18n::LanguageStrings;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Which form a submission came from. Determines required fields,
/// email template and destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmissionKind {
    Contact,
    Estimate,
    Quote,
}

impl SubmissionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionKind::Contact => "contact",
            SubmissionKind::Estimate => "estimate",
            SubmissionKind::Quote => "quote",
        }
    }

    /// Path of the API route accepting this kind.
    pub fn endpoint(&self) -> &'static str {
        match self {
            SubmissionKind::Contact => "/api/contact",
            SubmissionKind::Estimate => "/api/estimate",
            SubmissionKind::Quote => "/api/send-quote",
        }
    }
}

impl fmt::Display for SubmissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named field of one form kind.
pub trait FormField: Copy + Ord + fmt::Debug + Send + Sync + 'static {
    /// Wire name of the field (JSON key).
    fn as_str(self) -> &'static str;

    /// Localized message shown when the field is required but empty.
    /// `None` for optional fields.
    fn required_message(self, strings: &LanguageStrings) -> Option<&'static str>;
}

/// A form kind with statically known fields.
pub trait Form:
    Clone + Default + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    type Field: FormField;

    const KIND: SubmissionKind;

    /// Fields that must be non-empty after trimming, in reporting order.
    const REQUIRED: &'static [Self::Field];

    /// Fields that end up in mail headers (the Reply-To mailbox).
    const HEADER: &'static [Self::Field];

    fn get(&self, field: Self::Field) -> &str;

    fn set(&mut self, field: Self::Field, value: String);

    fn into_submission(self) -> FormSubmission;
}

/// Scalar JSON values a form field accepts.
#[derive(Deserialize)]
#[serde(untagged)]
enum FieldValue {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
}

/// Deserialize a field as text: `null` and missing values become the empty
/// string, numbers and booleans their JSON text. Objects and arrays are
/// rejected.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<FieldValue>::deserialize(deserializer)? {
        None => String::new(),
        Some(FieldValue::Text(text)) => text,
        Some(FieldValue::Number(number)) => number.to_string(),
        Some(FieldValue::Flag(flag)) => flag.to_string(),
    })
}

// ==================== Contact ====================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactSubmission {
    #[serde(deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContactField {
    Name,
    Email,
    Message,
}

impl FormField for ContactField {
    fn as_str(self) -> &'static str {
        match self {
            ContactField::Name => "name",
            ContactField::Email => "email",
            ContactField::Message => "message",
        }
    }

    fn required_message(self, strings: &LanguageStrings) -> Option<&'static str> {
        Some(match self {
            ContactField::Name => strings.name_required,
            ContactField::Email => strings.email_required,
            ContactField::Message => strings.message_required,
        })
    }
}

impl Form for ContactSubmission {
    type Field = ContactField;

    const KIND: SubmissionKind = SubmissionKind::Contact;

    const REQUIRED: &'static [ContactField] =
        &[ContactField::Name, ContactField::Email, ContactField::Message];

    const HEADER: &'static [ContactField] = &[ContactField::Name, ContactField::Email];

    fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Message => &self.message,
        }
    }

    fn set(&mut self, field: ContactField, value: String) {
        match field {
            ContactField::Name => self.name = value,
            ContactField::Email => self.email = value,
            ContactField::Message => self.message = value,
        }
    }

    fn into_submission(self) -> FormSubmission {
        FormSubmission::Contact(self)
    }
}

// ==================== Estimate ====================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimateSubmission {
    #[serde(deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub company: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EstimateField {
    Name,
    Company,
    Email,
    Phone,
    Description,
}

impl FormField for EstimateField {
    fn as_str(self) -> &'static str {
        match self {
            EstimateField::Name => "name",
            EstimateField::Company => "company",
            EstimateField::Email => "email",
            EstimateField::Phone => "phone",
            EstimateField::Description => "description",
        }
    }

    fn required_message(self, strings: &LanguageStrings) -> Option<&'static str> {
        match self {
            EstimateField::Name => Some(strings.name_required),
            EstimateField::Email => Some(strings.email_required),
            EstimateField::Description => Some(strings.description_required),
            EstimateField::Phone | EstimateField::Company => None,
        }
    }
}

impl Form for EstimateSubmission {
    type Field = EstimateField;

    const KIND: SubmissionKind = SubmissionKind::Estimate;

    const REQUIRED: &'static [EstimateField] = &[
        EstimateField::Name,
        EstimateField::Email,
        EstimateField::Description,
    ];

    const HEADER: &'static [EstimateField] = &[EstimateField::Name, EstimateField::Email];

    fn get(&self, field: EstimateField) -> &str {
        match field {
            EstimateField::Name => &self.name,
            EstimateField::Company => &self.company,
            EstimateField::Email => &self.email,
            EstimateField::Phone => &self.phone,
            EstimateField::Description => &self.description,
        }
    }

    fn set(&mut self, field: EstimateField, value: String) {
        match field {
            EstimateField::Name => self.name = value,
            EstimateField::Company => self.company = value,
            EstimateField::Email => self.email = value,
            EstimateField::Phone => self.phone = value,
            EstimateField::Description => self.description = value,
        }
    }

    fn into_submission(self) -> FormSubmission {
        FormSubmission::Estimate(self)
    }
}

// ==================== Quote ====================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteSubmission {
    #[serde(deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub message: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub address: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub surface: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QuoteField {
    Name,
    Email,
    Phone,
    Message,
    Address,
    Surface,
}

impl FormField for QuoteField {
    fn as_str(self) -> &'static str {
        match self {
            QuoteField::Name => "name",
            QuoteField::Email => "email",
            QuoteField::Phone => "phone",
            QuoteField::Message => "message",
            QuoteField::Address => "address",
            QuoteField::Surface => "surface",
        }
    }

    fn required_message(self, strings: &LanguageStrings) -> Option<&'static str> {
        Some(match self {
            QuoteField::Name => strings.name_required,
            QuoteField::Email => strings.email_required,
            QuoteField::Phone => strings.phone_required,
            QuoteField::Message => strings.message_required,
            QuoteField::Address => strings.address_required,
            QuoteField::Surface => strings.surface_required,
        })
    }
}

impl Form for QuoteSubmission {
    type Field = QuoteField;

    const KIND: SubmissionKind = SubmissionKind::Quote;

    const REQUIRED: &'static [QuoteField] = &[
        QuoteField::Name,
        QuoteField::Email,
        QuoteField::Phone,
        QuoteField::Message,
        QuoteField::Address,
        QuoteField::Surface,
    ];

    const HEADER: &'static [QuoteField] = &[QuoteField::Name, QuoteField::Email];

    fn get(&self, field: QuoteField) -> &str {
        match field {
            QuoteField::Name => &self.name,
            QuoteField::Email => &self.email,
            QuoteField::Phone => &self.phone,
            QuoteField::Message => &self.message,
            QuoteField::Address => &self.address,
            QuoteField::Surface => &self.surface,
        }
    }

    fn set(&mut self, field: QuoteField, value: String) {
        match field {
            QuoteField::Name => self.name = value,
            QuoteField::Email => self.email = value,
            QuoteField::Phone => self.phone = value,
            QuoteField::Message => self.message = value,
            QuoteField::Address => self.address = value,
            QuoteField::Surface => self.surface = value,
        }
    }

    fn into_submission(self) -> FormSubmission {
        FormSubmission::Quote(self)
    }
}

// ==================== Tagged Union ====================

/// A validated submission of any kind, as handed to the email relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormSubmission {
    Contact(ContactSubmission),
    Estimate(EstimateSubmission),
    Quote(QuoteSubmission),
}

impl FormSubmission {
    pub fn kind(&self) -> SubmissionKind {
        match self {
            FormSubmission::Contact(_) => SubmissionKind::Contact,
            FormSubmission::Estimate(_) => SubmissionKind::Estimate,
            FormSubmission::Quote(_) => SubmissionKind::Quote,
        }
    }

    /// Submitter's name, used as the Reply-To display name.
    pub fn name(&self) -> &str {
        match self {
            FormSubmission::Contact(c) => &c.name,
            FormSubmission::Estimate(e) => &e.name,
            FormSubmission::Quote(q) => &q.name,
        }
    }

    /// Submitter's email address, used as the Reply-To address.
    pub fn email(&self) -> &str {
        match self {
            FormSubmission::Contact(c) => &c.email,
            FormSubmission::Estimate(e) => &e.email,
            FormSubmission::Quote(q) => &q.email,
        }
    }
}
