//! Page contract settings: storage key, element ids, icon classes, timings.
//!
//! DESIGN
//! ======
//! The defaults reproduce the markup the server templates already emit, so a
//! page needs no configuration at all. A page may override any subset of
//! fields with a JSON block; absent fields keep their defaults.

use serde::Deserialize;

use crate::error::UiError;
use crate::state::theme::Theme;

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Persisted theme preference key.
pub const DEFAULT_STORAGE_KEY: &str = "app-theme";
/// Milliseconds a toast stays visible before it starts hiding.
pub const DEFAULT_TOAST_DURATION_MS: u32 = 5000;
/// Length of the toast fade-out, matching the stylesheet's `.fade` transition.
pub const DEFAULT_HIDE_TRANSITION_MS: u32 = 150;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct UiConfig {
    pub storage_key: String,
    /// Attribute written on the document root element.
    pub theme_attribute: String,
    pub toggle_id: String,
    pub icon_id: String,
    pub light_icon_class: String,
    pub dark_icon_class: String,
    pub toast_container_id: String,
    /// Id of the `<script type="application/json">` block holding flash messages.
    pub flash_messages_id: String,
    pub default_duration_ms: u32,
    pub hide_transition_ms: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            theme_attribute: "data-bs-theme".to_owned(),
            toggle_id: "themeToggle".to_owned(),
            icon_id: "themeIcon".to_owned(),
            light_icon_class: "bi-sun-fill".to_owned(),
            dark_icon_class: "bi-moon-fill".to_owned(),
            toast_container_id: "toastContainer".to_owned(),
            flash_messages_id: "flashMessages".to_owned(),
            default_duration_ms: DEFAULT_TOAST_DURATION_MS,
            hide_transition_ms: DEFAULT_HIDE_TRANSITION_MS,
        }
    }
}

impl UiConfig {
    /// Parse a JSON override; fields not present keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::Json`] on malformed JSON, wrong field types, or
    /// unknown field names.
    pub fn from_json(raw: &str) -> Result<Self, UiError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Icon class shown for `theme`.
    #[must_use]
    pub fn icon_class(&self, theme: Theme) -> &str {
        match theme {
            Theme::Light => &self.light_icon_class,
            Theme::Dark => &self.dark_icon_class,
        }
    }
}
