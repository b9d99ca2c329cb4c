//! Language type: validated language representation.

use crate::i18n::{LanguageConfig, LanguageRegistry, LanguageStrings};
use anyhow::{bail, Result};

/// A language the site is translated into.
///
/// Built from the constants or from a code checked against the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    code: &'static str,
}

impl Language {
    pub const FRENCH: Language = Language { code: "fr" };

    pub const ENGLISH: Language = Language { code: "en" };

    /// Parse a language code (e.g. the `lang` query parameter).
    pub fn from_code(code: &str) -> Result<Language> {
        match LanguageRegistry::get().get_by_code(code) {
            Some(config) if config.enabled => Ok(Language { code: config.code }),
            Some(_) => bail!("Language '{}' is not enabled", code),
            None => bail!("Unknown language code: '{}'", code),
        }
    }

    /// The site's default language.
    pub fn canonical() -> Language {
        Language {
            code: LanguageRegistry::get().canonical().code,
        }
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    /// # Panics
    /// Panics if the code is missing from the registry, which cannot happen
    /// for a `Language` built through `from_code` or the constants.
    fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    /// Localized copy for this language.
    pub fn strings(&self) -> &'static LanguageStrings {
        self.config().strings
    }

    /// The language the navbar toggle switches to.
    pub fn next(&self) -> Language {
        LanguageRegistry::get()
            .next_after(self.code)
            .map(|config| Language { code: config.code })
            .unwrap_or(*self)
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::canonical()
    }
}
