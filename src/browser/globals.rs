//! `window.showToast` and friends for inline page scripts.
//!
//! Arguments arrive as untyped JS values and are coerced the way the page
//! expects: the message is stringified, a non-string category means info, and
//! a missing or non-numeric duration means the configured default.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen::closure::{Closure, WasmClosure};
use web_sys::Window;

use super::BrowserNotifier;
use crate::error::UiError;
use crate::state::toast::ToastKind;
use crate::util::page::coerce_duration;

pub(super) fn install(window: &Window, notifier: &BrowserNotifier) -> Result<(), UiError> {
    let toasts = notifier.clone();
    define(
        window,
        "showToast",
        Closure::wrap(Box::new(move |message: JsValue, category: JsValue, duration: JsValue| {
            toasts.show_toast(
                &js_text(&message),
                category.as_string().as_deref(),
                js_duration(&duration),
            );
        }) as Box<dyn FnMut(JsValue, JsValue, JsValue)>),
    )?;

    for (name, kind) in [
        ("showSuccess", ToastKind::Success),
        ("showError", ToastKind::Error),
        ("showWarning", ToastKind::Warning),
        ("showInfo", ToastKind::Info),
    ] {
        let toasts = notifier.clone();
        define(
            window,
            name,
            Closure::wrap(Box::new(move |message: JsValue, duration: JsValue| {
                toasts.show_toast(&js_text(&message), Some(kind.as_str()), js_duration(&duration));
            }) as Box<dyn FnMut(JsValue, JsValue)>),
        )?;
    }
    Ok(())
}

/// Publish `closure` as `window[name]` for the lifetime of the page.
fn define<T: ?Sized + WasmClosure>(window: &Window, name: &str, closure: Closure<T>) -> Result<(), UiError> {
    js_sys::Reflect::set(window, &JsValue::from_str(name), closure.as_ref())
        .map_err(|err| UiError::dom(name, &err))?;
    closure.forget();
    Ok(())
}

/// `String(value)`, with `null`/`undefined` as empty text.
fn js_text(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if value.is_null() || value.is_undefined() {
        return String::new();
    }
    String::from(value.unchecked_ref::<js_sys::Object>().to_string())
}

fn js_duration(value: &JsValue) -> Option<u32> {
    coerce_duration(value.as_f64()?)
}
