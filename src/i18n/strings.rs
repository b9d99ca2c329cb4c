/// All localized copy used by the form pipeline for one language.
///
/// Strings are stored unescaped; they are rendered into HTML by the page
/// layer, not by this crate.
#[derive(Debug, Clone)]
pub struct LanguageStrings {
    // ==================== Navigation ====================
    /// Label of the toggle that switches to the *other* language
    pub language_toggle: &'static str,

    // ==================== Buttons ====================
    /// Submit button label
    pub submit_button: &'static str,

    /// Submit button label while a submission is pending
    pub sending_button: &'static str,

    // ==================== Required-field Messages ====================
    pub name_required: &'static str,
    pub email_required: &'static str,
    pub phone_required: &'static str,
    pub message_required: &'static str,
    pub description_required: &'static str,
    pub address_required: &'static str,
    pub surface_required: &'static str,

    // ==================== Submission Outcome ====================
    /// Shown after the server accepted the submission
    pub submit_success: &'static str,

    /// Shown when the server rejected the submission without an error message
    pub submit_failed: &'static str,

    /// Shown when the request never reached the server
    pub connection_error: &'static str,
}

// ==================== French Strings ====================

/// French strings (default language of the site)
pub const FRENCH_STRINGS: LanguageStrings = LanguageStrings {
    language_toggle: "EN",

    submit_button: "Envoyer",
    sending_button: "Envoi en cours…",

    name_required: "Nom et prénom requis",
    email_required: "Email requis",
    phone_required: "Téléphone requis",
    message_required: "Message requis",
    description_required: "Description requise",
    address_required: "Adresse requise",
    surface_required: "Surface requise",

    submit_success: "Merci ! Votre demande a bien été envoyée, nous vous recontacterons rapidement.",
    submit_failed: "Une erreur est survenue lors de l'envoi. Veuillez réessayer.",
    connection_error: "Erreur de connexion. Vérifiez votre réseau et réessayez.",
};

// ==================== English Strings ====================

/// English strings
pub const ENGLISH_STRINGS: LanguageStrings = LanguageStrings {
    language_toggle: "FR",

    submit_button: "Send",
    sending_button: "Sending…",

    name_required: "Full name required",
    email_required: "Email required",
    phone_required: "Phone number required",
    message_required: "Message required",
    description_required: "Description required",
    address_required: "Address required",
    surface_required: "Surface area required",

    submit_success: "Thank you! Your request has been sent, we will get back to you shortly.",
    submit_failed: "Something went wrong while sending. Please try again.",
    connection_error: "Connection error. Check your network and try again.",
};
