//! Language registry: single source of truth for the site's languages.
//!
//! The registry is immutable reference data initialized once with `OnceLock`.
//! Which language is *active* is not stored here; that lives in a
//! [`Locale`](crate::i18n::Locale) owned by whoever renders copy.

use crate::i18n::strings::{ENGLISH_STRINGS, FRENCH_STRINGS};
use crate::i18n::LanguageStrings;
use std::sync::OnceLock;

/// Configuration for a supported language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// ISO 639-1 language code (e.g., "fr", "en")
    pub code: &'static str,

    /// Whether this is the site's default language (exactly one is)
    pub is_canonical: bool,

    /// Whether visitors may switch to this language
    pub enabled: bool,

    pub strings: &'static LanguageStrings,
}

/// Global language registry singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its code.
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Get the canonical language configuration.
    ///
    /// # Panics
    /// Panics if zero or several canonical languages are defined, which is a
    /// programming error in [`default_languages`].
    pub fn canonical(&self) -> &LanguageConfig {
        let canonical_langs: Vec<_> = self
            .languages
            .iter()
            .filter(|lang| lang.is_canonical)
            .collect();

        match canonical_langs.len() {
            0 => panic!("No canonical language found in registry"),
            1 => canonical_langs[0],
            _ => panic!("Multiple canonical languages found in registry"),
        }
    }

    /// The enabled language a toggle switches to from `code`.
    pub fn next_after(&self, code: &str) -> Option<&LanguageConfig> {
        let enabled: Vec<_> = self.languages.iter().filter(|lang| lang.enabled).collect();
        let position = enabled.iter().position(|lang| lang.code == code)?;
        Some(enabled[(position + 1) % enabled.len()])
    }
}

/// French is the site's default language; English is the alternate.
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "fr",
            is_canonical: true,
            enabled: true,
            strings: &FRENCH_STRINGS,
        },
        LanguageConfig {
            code: "en",
            is_canonical: false,
            enabled: true,
            strings: &ENGLISH_STRINGS,
        },
    ]
}
