//! Page-lifecycle and argument-coercion decisions made by the browser layer.

#[cfg(test)]
#[path = "page_test.rs"]
mod page_test;

/// Longest delay `setTimeout` honors; larger values fire immediately.
pub const MAX_TIMEOUT_MS: u32 = i32::MAX.unsigned_abs();

/// Whether setup must wait for `DOMContentLoaded` given `document.readyState`.
#[must_use]
pub fn defer_until_ready(ready_state: &str) -> bool {
    ready_state == "loading"
}

/// Toast duration from a JS number: NaN means "use the default", negatives
/// clamp to zero, and anything past [`MAX_TIMEOUT_MS`] is capped.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn coerce_duration(ms: f64) -> Option<u32> {
    if ms.is_nan() {
        return None;
    }
    Some(ms.clamp(0.0, f64::from(MAX_TIMEOUT_MS)) as u32)
}
