//! Server flash messages embedded in the page.
//!
//! The server renders pending flashes as a JSON array of `[category, message]`
//! pairs inside a `<script type="application/json">` block. Each pair is shown
//! as a toast once the notifier is up.

use serde::Deserialize;

use crate::error::UiError;

#[cfg(test)]
#[path = "flash_test.rs"]
mod flash_test;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "(String, String)")]
pub struct FlashMessage {
    /// Raw category as queued by the server (`success`, `danger`, ...).
    pub category: String,
    pub message: String,
}

impl From<(String, String)> for FlashMessage {
    fn from((category, message): (String, String)) -> Self {
        Self { category, message }
    }
}

/// Parse the flash block. Blank input means nothing was queued.
///
/// # Errors
///
/// Returns [`UiError::Json`] when the payload is not an array of string pairs.
pub fn parse_flash_messages(raw: &str) -> Result<Vec<FlashMessage>, UiError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(raw)?)
}
