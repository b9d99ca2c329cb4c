//! Locale: the active-language context handed to anything that renders copy.

use crate::i18n::{Language, LanguageStrings};
use tracing::debug;

/// The current language of one rendering tree.
///
/// A `Locale` is created by the page shell and passed by reference to forms,
/// validators and dispatchers. Switching language mutates this value only;
/// other `Locale`s are unaffected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Locale {
    language: Language,
}

impl Locale {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Localized copy for the current language.
    pub fn strings(&self) -> &'static LanguageStrings {
        self.language.strings()
    }

    pub fn set_language(&mut self, language: Language) {
        debug!("Switching locale {} -> {}", self.language.code(), language.code());
        self.language = language;
    }

    /// Flip to the other language (the navbar toggle).
    pub fn toggle(&mut self) {
        self.set_language(self.language.next());
    }

    /// Label of the navbar toggle; names the language it switches to.
    pub fn toggle_label(&self) -> &'static str {
        self.strings().language_toggle
    }
}
