//! Markup helpers for toast cards.
//!
//! Escaping reproduces what a browser serializes for a text node: assigning a
//! string as an element's text content and reading back its inner HTML turns
//! `&`, `<`, `>` and U+00A0 into entities and leaves everything else as is.

use crate::state::toast::Toast;

#[cfg(test)]
#[path = "html_test.rs"]
mod html_test;

/// Escape `text` so it renders literally inside element content.
#[must_use]
pub fn escape_html(text: &str) -> String {
    // `encode_text` covers `&`, `<` and `>`; browsers also serialize U+00A0.
    html_escape::encode_text(text).replace('\u{a0}', "&nbsp;")
}

/// Upper-case the first character, leave the rest untouched.
#[must_use]
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Card markup appended to the toast container.
#[must_use]
pub fn render_toast_card(toast: &Toast) -> String {
    format!(
        concat!(
            r#"<div id="{id}" class="toast toast-{kind}" role="alert" aria-live="assertive" aria-atomic="true">"#,
            r#"<div class="toast-header">"#,
            r#"<i class="bi {icon} me-2"></i>"#,
            r#"<strong class="me-auto">{label}</strong>"#,
            r#"<button type="button" class="btn-close btn-close-white" data-bs-dismiss="toast" aria-label="Close"></button>"#,
            "</div>",
            r#"<div class="toast-body">{body}</div>"#,
            "</div>",
        ),
        id = toast.id,
        kind = toast.kind,
        icon = toast.kind.icon_class(),
        label = toast.kind.label(),
        body = escape_html(&toast.message),
    )
}
