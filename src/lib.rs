//! Form relay for the ATD Briques website.
//!
//! Visitors fill in the contact, estimate or quote form; the browser-side
//! [`client`] validates and posts it, the [`api`] routes re-validate and the
//! [`email`] relay forwards it to the company mailbox over SMTP.

pub mod api;
pub mod client;
pub mod config;
pub mod email;
pub mod forms;
pub mod i18n;
pub mod smtp;
pub mod templates;
pub mod validation;
