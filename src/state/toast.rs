//! Toast categories and instances.
//!
//! A toast is display-only: once appended it lives until its hide transition
//! finishes, then the notifier removes it from the container.

use std::fmt;

use crate::util::html::capitalize_first;

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

/// Severity of a toast. Unknown inputs normalize to `Info`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

impl ToastKind {
    pub const ALL: [Self; 4] = [Self::Success, Self::Error, Self::Warning, Self::Info];

    /// Case-insensitive category lookup. `danger` is the Bootstrap alias for
    /// `error`; anything unrecognized is `Info`.
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "success" => Self::Success,
            "error" | "danger" => Self::Error,
            "warning" => Self::Warning,
            _ => Self::Info,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }

    /// Bootstrap Icons class shown in the card header.
    #[must_use]
    pub const fn icon_class(self) -> &'static str {
        match self {
            Self::Success => "bi-check-circle-fill",
            Self::Error => "bi-x-circle-fill",
            Self::Warning => "bi-exclamation-triangle-fill",
            Self::Info => "bi-info-circle-fill",
        }
    }

    /// Header label, e.g. `Success`.
    #[must_use]
    pub fn label(self) -> String {
        capitalize_first(self.as_str())
    }
}

impl fmt::Display for ToastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// DOM id of a toast card, `toast-<millis>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ToastId(String);

impl ToastId {
    #[must_use]
    pub fn from_millis(millis: u64) -> Self {
        Self(format!("toast-{millis}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ToastId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ToastId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub kind: ToastKind,
    /// Raw message text; escaped only when rendered.
    pub message: String,
    pub duration_ms: u32,
}
