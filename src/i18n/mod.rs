//! Internationalization (i18n) for the bilingual site.
//!
//! # Architecture
//!
//! - `registry`: immutable list of supported languages and their copy
//! - `language`: validated `Language` handle
//! - `strings`: localized strings for the form pipeline
//! - `locale`: the active-language context passed explicitly to consumers
//!
//! # Example
//!
//! ```rust,ignore
//! use atd_briques::i18n::{Language, Locale};
//!
//! let mut locale = Locale::default(); // French
//! locale.toggle();                    // English
//! assert_eq!(locale.strings().submit_button, "Send");
//! ```

mod language;
mod locale;
mod registry;
mod strings;

pub use language::Language;
pub use locale::Locale;
pub use registry::{LanguageConfig, LanguageRegistry};
pub use strings::LanguageStrings;
