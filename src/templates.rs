//! HTML bodies of the notification emails sent to the company.
//!
//! Every user-supplied value goes through [`escape_html`] before it is
//! interpolated; free text keeps its line breaks as `<br>`.

use crate::forms::{ContactSubmission, EstimateSubmission, FormSubmission, QuoteSubmission};

/// Escape the five HTML-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + text.len() / 8);

    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }

    result
}

/// Escape multi-line free text and keep its line structure.
fn escape_multiline(text: &str) -> String {
    text.lines().map(escape_html).collect::<Vec<_>>().join("<br>\n")
}

/// `<p><strong>Label:</strong> value</p>`
fn field_line(label: &str, value: &str) -> String {
    format!("<p><strong>{}:</strong> {}</p>\n", label, escape_html(value.trim()))
}

fn block(label: &str, value: &str) -> String {
    format!(
        "<p><strong>{}:</strong></p>\n<p>{}</p>\n",
        label,
        escape_multiline(value.trim())
    )
}

/// Render the email body for a submission.
pub fn render(submission: &FormSubmission) -> String {
    match submission {
        FormSubmission::Contact(contact) => render_contact(contact),
        FormSubmission::Estimate(estimate) => render_estimate(estimate),
        FormSubmission::Quote(quote) => render_quote(quote),
    }
}

fn render_contact(data: &ContactSubmission) -> String {
    let mut html = String::from("<h2>Nouveau message de contact</h2>\n");
    html.push_str(&field_line("Nom", &data.name));
    html.push_str(&field_line("Email", &data.email));
    html.push_str(&block("Message", &data.message));
    html
}

fn render_estimate(data: &EstimateSubmission) -> String {
    let mut html = String::from("<h2>Nouvelle demande de devis</h2>\n");
    html.push_str(&field_line("Nom", &data.name));
    html.push_str(&field_line("Email", &data.email));
    html.push_str(&field_line("Téléphone", &data.phone));
    if !data.company.trim().is_empty() {
        html.push_str(&field_line("Entreprise", &data.company));
    }
    html.push_str(&block("Description du projet", &data.description));
    html
}

fn render_quote(data: &QuoteSubmission) -> String {
    let mut html = String::from("<h2>Nouvelle demande de devis</h2>\n");
    html.push_str(&field_line("Nom", &data.name));
    html.push_str(&field_line("Email", &data.email));
    html.push_str(&field_line("Téléphone", &data.phone));
    html.push_str(&field_line("Adresse", &data.address));
    html.push_str(&field_line("Surface", &data.surface));
    html.push_str(&block("Message", &data.message));
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== escape_html Tests ====================

    #[test]
    fn test_escape_html_special_chars() {
        assert_eq!(
            escape_html(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#39;y&#39;&lt;/script&gt;"
        );
    }

    #[test]
    fn test_escape_html_plain_text_unchanged() {
        assert_eq!(escape_html("Façade en briques, 40 m²"), "Façade en briques, 40 m²");
    }

    #[test]
    fn test_escape_multiline_keeps_breaks() {
        assert_eq!(escape_multiline("a<b\nc"), "a&lt;b<br>\nc");
    }

    // ==================== render Tests ====================

    #[test]
    fn test_render_contact() {
        let html = render(&FormSubmission::Contact(ContactSubmission {
            name: "Jean Dupont".to_string(),
            email: "jean@example.com".to_string(),
            message: "Bonjour".to_string(),
        }));

        assert!(html.starts_with("<h2>Nouveau message de contact</h2>"));
        assert!(html.contains("<p><strong>Nom:</strong> Jean Dupont</p>"));
        assert!(html.contains("<p><strong>Email:</strong> jean@example.com</p>"));
        assert!(html.contains("<p>Bonjour</p>"));
    }

    #[test]
    fn test_render_contact_escapes_user_input() {
        let html = render(&FormSubmission::Contact(ContactSubmission {
            name: "<b>Evil</b>".to_string(),
            email: "evil@example.com".to_string(),
            message: "<img src=x onerror=alert(1)>".to_string(),
        }));

        assert!(!html.contains("<b>Evil</b>"));
        assert!(!html.contains("<img"));
        assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
    }

    #[test]
    fn test_render_estimate_without_optional_fields() {
        let html = render(&FormSubmission::Estimate(EstimateSubmission {
            name: "Jean".to_string(),
            email: "jean@example.com".to_string(),
            description: "Muret".to_string(),
            phone: String::new(),
            company: String::new(),
        }));

        assert!(!html.contains("undefined"));
        assert!(!html.contains("Entreprise"));
        assert!(html.contains("<p><strong>Téléphone:</strong> </p>"));
        assert!(html.contains("Description du projet"));
    }

    #[test]
    fn test_render_estimate_with_company() {
        let html = render(&FormSubmission::Estimate(EstimateSubmission {
            name: "Jean".to_string(),
            email: "jean@example.com".to_string(),
            description: "Muret".to_string(),
            phone: "0601020304".to_string(),
            company: "Smith & Fils".to_string(),
        }));

        assert!(html.contains("<p><strong>Entreprise:</strong> Smith &amp; Fils</p>"));
        assert!(html.contains("0601020304"));
    }

    #[test]
    fn test_render_quote_contains_every_field() {
        let html = render(&FormSubmission::Quote(QuoteSubmission {
            name: "Jean".to_string(),
            email: "jean@example.com".to_string(),
            phone: "0601020304".to_string(),
            message: "Terrasse".to_string(),
            address: "1 rue des Briques".to_string(),
            surface: "40 m²".to_string(),
        }));

        for needle in ["Adresse:</strong> 1 rue des Briques", "Surface:</strong> 40 m²", "<p>Terrasse</p>"] {
            assert!(html.contains(needle), "missing {needle}");
        }
    }
}
