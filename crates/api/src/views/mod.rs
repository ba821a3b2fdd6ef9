//! HTML rendering for full pages and the fragments the front end swaps in.
//!
//! Every value interpolated into markup goes through [`escape`].

pub mod files;
pub mod kanji;
pub mod pages;

use crate::middleware::csrf::CSRF_FORM_FIELD;

/// Page template compiled into the binary.
const BASE_TEMPLATE: &str = include_str!("../../templates/base.html");

const TITLE_SLOT: &str = "{{title}}";
const MESSAGE_SLOT: &str = "{{message}}";
const CSRF_SLOT: &str = "{{csrf_token}}";

/// Template problems found at startup. Fatal.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("template is missing the {0} placeholder")]
    MissingPlaceholder(&'static str),
}

/// Escape text for use in HTML content and double-quoted attribute values.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Hidden form field carrying the CSRF token, or nothing when there is none.
pub fn csrf_field(token: &str) -> String {
    if token.is_empty() {
        String::new()
    } else {
        format!(
            r#"<input type="hidden" name="{}" value="{}">"#,
            CSRF_FORM_FIELD,
            escape(token)
        )
    }
}

/// The full-page template, validated once at startup.
#[derive(Debug, Clone)]
pub struct Templates {
    base: String,
}

impl Templates {
    /// Load the embedded page template.
    pub fn load() -> Result<Self, TemplateError> {
        Self::from_source(BASE_TEMPLATE)
    }

    /// Validate `source` as a page template.
    pub fn from_source(source: &str) -> Result<Self, TemplateError> {
        for slot in [TITLE_SLOT, MESSAGE_SLOT, CSRF_SLOT] {
            if !source.contains(slot) {
                return Err(TemplateError::MissingPlaceholder(slot));
            }
        }
        Ok(Self {
            base: source.to_string(),
        })
    }

    /// Render the full page.
    pub fn render_page(&self, title: &str, message: &str, csrf_token: &str) -> String {
        self.base
            .replace(TITLE_SLOT, &escape(title))
            .replace(MESSAGE_SLOT, &escape(message))
            .replace(CSRF_SLOT, &escape(csrf_token))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape(r#"<script>alert("x" & 'y')</script>"#),
            "&lt;script&gt;alert(&quot;x&quot; &amp; &#39;y&#39;)&lt;/script&gt;"
        );
        assert_eq!(escape("日本"), "日本");
    }

    #[test]
    fn embedded_template_is_valid() {
        let templates = Templates::load().unwrap();
        let page = templates.render_page("Kanji Go", "Welcome", "tok.en");
        assert!(page.contains("<title>Kanji Go</title>"));
        assert!(page.contains("tok.en"));
        assert!(!page.contains("{{"));
    }

    #[test]
    fn template_without_csrf_slot_is_rejected() {
        assert_matches!(
            Templates::from_source("<title>{{title}}</title>{{message}}"),
            Err(TemplateError::MissingPlaceholder("{{csrf_token}}"))
        );
    }

    #[test]
    fn rendered_values_are_escaped() {
        let templates = Templates::from_source("{{title}}|{{message}}|{{csrf_token}}").unwrap();
        assert_eq!(
            templates.render_page("<b>", "a&b", "\""),
            "&lt;b&gt;|a&amp;b|&quot;"
        );
    }

    #[test]
    fn csrf_field_is_omitted_without_token() {
        assert_eq!(csrf_field(""), "");
        assert!(csrf_field("abc.def").contains(r#"value="abc.def""#));
    }
}
