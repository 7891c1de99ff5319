//! Presentation Layer — renders the session as the offer form page.

pub mod templates;

use std::collections::BTreeMap;

use handlebars::Handlebars;
use serde::Serialize;

use crate::form::{Field, FormState, ResponseType};
use crate::session::Session;
use templates::{PAGE, PAGE_TEMPLATE};

pub const TITLE: &str = "Responder";

/// Per-field view data consumed by the template.
#[derive(Debug, Serialize)]
pub struct FieldView<'a> {
    pub value: &'a str,
    pub aria_invalid: &'static str,
    pub invalid: bool,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct PageView<'a> {
    pub title: &'static str,
    /// Keyed by form key (`name`, `tel`, `api_key`, `offer`, `offer_type`).
    pub fields: BTreeMap<&'static str, FieldView<'a>>,
    pub quote_checked: bool,
    pub call_checked: bool,
    pub answer: Option<&'a str>,
}

impl<'a> PageView<'a> {
    pub fn from_session(session: &'a Session) -> Self {
        let form = &session.form;
        let choice = form.value(Field::ResponseType).parse::<ResponseType>().ok();

        Self {
            title: TITLE,
            fields: field_views(form),
            quote_checked: choice == Some(ResponseType::Quote),
            call_checked: choice == Some(ResponseType::Call),
            answer: session.answer().map(|a| a.text.as_str()),
        }
    }
}

fn field_views(form: &FormState) -> BTreeMap<&'static str, FieldView<'_>> {
    Field::ALL
        .into_iter()
        .map(|field| {
            let validity = form.validity(field);
            let view = FieldView {
                value: form.value(field),
                aria_invalid: validity.aria_invalid(),
                invalid: validity.is_invalid(),
                message: field.error_message(),
            };
            (field.key(), view)
        })
        .collect()
}

/// Owns the compiled page template.
pub struct PageRenderer {
    registry: Handlebars<'static>,
}

impl PageRenderer {
    pub fn new() -> anyhow::Result<Self> {
        let mut registry = Handlebars::new();
        registry.register_template_string(PAGE, PAGE_TEMPLATE)?;
        Ok(Self { registry })
    }

    pub fn render(&self, session: &Session) -> Result<String, handlebars::RenderError> {
        self.registry
            .render(PAGE, &PageView::from_session(session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::fixtures;

    fn render(session: &Session) -> String {
        PageRenderer::new().unwrap().render(session).unwrap()
    }

    #[test]
    fn test_empty_page_has_form_and_no_answer() {
        let html = render(&Session::new());
        assert!(html.contains("<title>Responder</title>"));
        assert!(html.contains("Générer"));
        assert!(html.contains("Réinitialiser"));
        assert!(!html.contains("id=\"answer\""));
        assert!(!html.contains("Copier"));
        assert!(!html.contains("class=\"error\""));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let mut session = Session::new();
        session.form.set(Field::Name, "<script>alert(1)</script>");
        let html = render(&session);
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn test_invalid_credential_shows_inline_message() {
        let mut session = Session::new();
        session.form.set(Field::Credential, "sk-short");
        let html = render(&session);
        assert!(html.contains("<small class=\"error\">API Key invalide</small>"));
        assert!(html.contains("placeholder=\"API Key\" value=\"sk-short\" aria-invalid=\"true\">"));
    }

    #[test]
    fn test_valid_field_marked_false() {
        let mut session = Session::new();
        session.form.set(Field::Name, "Alice");
        let view = PageView::from_session(&session);
        assert_eq!(view.fields["name"].aria_invalid, "false");
        assert_eq!(view.fields["tel"].aria_invalid, "");
    }

    #[test]
    fn test_selected_choice_is_checked() {
        let mut session = Session::new();
        session.form.apply(fixtures::call_form());
        let view = PageView::from_session(&session);
        assert!(view.call_checked);
        assert!(!view.quote_checked);
        assert!(render(&session).contains("value=\"Appel\" data-field=\"offer_type\" aria-invalid=\"false\" checked"));
    }

    #[test]
    fn test_view_exposes_answer_verbatim() {
        let mut session = Session::new();
        session.record_answer("Bonjour,\n\nMerci.".to_string());
        let view = PageView::from_session(&session);
        assert_eq!(view.answer, Some("Bonjour,\n\nMerci."));
        let html = render(&session);
        assert!(html.contains("<div id=\"answer\">Bonjour,\n\nMerci.</div>"));
        assert!(html.contains("Copier"));
    }

    #[test]
    fn test_offer_leading_line_break_survives_rerender() {
        let mut session = Session::new();
        session.form.set(Field::OfferText, "\nLigne deux");
        let html = render(&session);
        assert!(html.contains("aria-invalid=\"true\">\n\nLigne deux</textarea>"));
    }
}
