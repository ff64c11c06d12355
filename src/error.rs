//! Crate-wide error type.
//!
//! Page-facing entry points never surface these to page scripts; they log and
//! carry on. Internally every fallible step returns `Result<_, UiError>`.

#[derive(Debug, thiserror::Error)]
pub enum UiError {
    #[error("element not found: #{0}")]
    MissingElement(String),
    #[error("client storage is unavailable")]
    StorageUnavailable,
    #[error("storage operation failed: {0}")]
    Storage(String),
    #[error("invalid json payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("dom operation failed: {0}")]
    Dom(String),
}

impl UiError {
    /// Whether this error means a required page element is absent.
    #[must_use]
    pub fn is_missing_element(&self) -> bool {
        matches!(self, Self::MissingElement(_))
    }
}

#[cfg(feature = "hydrate")]
impl UiError {
    /// Wrap a thrown JS value from a DOM call, keeping its string form.
    pub(crate) fn dom(context: &str, value: &wasm_bindgen::JsValue) -> Self {
        Self::Dom(format!("{context}: {}", js_message(value)))
    }

    /// Wrap a thrown JS value from a `Storage` call.
    pub(crate) fn storage(context: &str, value: &wasm_bindgen::JsValue) -> Self {
        Self::Storage(format!("{context}: {}", js_message(value)))
    }
}

#[cfg(feature = "hydrate")]
fn js_message(value: &wasm_bindgen::JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
