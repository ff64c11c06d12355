//! WebAssembly entry point.
//!
//! SYSTEM CONTEXT
//! ==============
//! The server renders plain HTML; this module attaches to it. The notifier and
//! the `showToast` globals are installed immediately so inline page scripts
//! can call them as soon as the module loads. The theme controller waits for
//! the document to finish parsing so the root element and icon exist.
//!
//! TRADE-OFFS
//! ==========
//! Configuration is read once at startup, so a `uiConfig` block placed after
//! the module script is ignored. Keep it in `<head>`.

mod dom;
mod globals;
mod platform;

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::wasm_bindgen;
use web_sys::Document;

use crate::components::theme_controller::ThemeController;
use crate::components::toast_notifier::ToastNotifier;
use crate::config::UiConfig;
use crate::error::UiError;
use crate::util::flash::parse_flash_messages;
use crate::util::page::defer_until_ready;

pub use dom::{DomThemeView, DomToastHost};
pub use platform::{DateClock, LocalStorage, TimeoutScheduler};

/// Id of the optional `<script type="application/json">` config override.
pub const CONFIG_ELEMENT_ID: &str = "uiConfig";

pub type BrowserThemeController = ThemeController<LocalStorage, DomThemeView>;
pub type BrowserNotifier = ToastNotifier<DomToastHost, TimeoutScheduler, DateClock>;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        log::warn!("ui-chrome: logger already installed: {err}");
    }
    if let Err(err) = boot() {
        log::error!("ui-chrome: startup failed: {err}");
    }
}

fn boot() -> Result<(), UiError> {
    let window = web_sys::window().ok_or_else(|| UiError::MissingElement("window".to_owned()))?;
    let document = window
        .document()
        .ok_or_else(|| UiError::MissingElement("document".to_owned()))?;
    let config = load_config(&document);

    let host = DomToastHost::new(document.clone(), &config.toast_container_id);
    let notifier = BrowserNotifier::new(config.clone(), host, TimeoutScheduler, DateClock);
    globals::install(&window, &notifier)?;
    dom::listen_for_dismiss(&document, &notifier)?;

    let storage = LocalStorage::open(&window);
    when_ready(&document, move |document| {
        if let Err(err) = mount_theme(document, &config, storage) {
            log::error!("theme: setup failed: {err}");
        }
        replay_flashes(document, &config, &notifier);
    })
}

/// Run `ready` now, or on `DOMContentLoaded` while the document is still loading.
fn when_ready(document: &Document, ready: impl FnOnce(&Document) + 'static) -> Result<(), UiError> {
    if !defer_until_ready(&document.ready_state()) {
        ready(document);
        return Ok(());
    }
    let doc = document.clone();
    let callback = Closure::once_into_js(move || ready(&doc));
    document
        .add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())
        .map_err(|err| UiError::dom("DOMContentLoaded listener", &err))
}

fn mount_theme(document: &Document, config: &UiConfig, storage: LocalStorage) -> Result<(), UiError> {
    let view = DomThemeView::new(document, config)?;
    let controller = Rc::new(BrowserThemeController::new(config.clone(), storage, view));
    if let Err(err) = controller.init_theme() {
        log::error!("theme: init failed: {err}");
    }

    let Some(toggle) = document.get_element_by_id(&config.toggle_id) else {
        log::debug!("theme: no #{} control, toggle disabled", config.toggle_id);
        return Ok(());
    };
    let on_click = Closure::wrap(Box::new(move || match controller.toggle_theme() {
        Ok(theme) => log::info!("theme: switched to {theme}"),
        Err(err) => log::error!("theme: toggle failed: {err}"),
    }) as Box<dyn FnMut()>);
    toggle
        .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
        .map_err(|err| UiError::dom("theme toggle listener", &err))?;
    on_click.forget();
    Ok(())
}

fn load_config(document: &Document) -> UiConfig {
    let Some(raw) = embedded_json(document, CONFIG_ELEMENT_ID) else {
        return UiConfig::default();
    };
    match UiConfig::from_json(&raw) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("ui-chrome: ignoring #{CONFIG_ELEMENT_ID}: {err}");
            UiConfig::default()
        }
    }
}

fn replay_flashes(document: &Document, config: &UiConfig, notifier: &BrowserNotifier) {
    let Some(raw) = embedded_json(document, &config.flash_messages_id) else {
        return;
    };
    match parse_flash_messages(&raw) {
        Ok(messages) => {
            let shown = notifier.show_flashes(&messages);
            log::debug!("toast: replayed {shown}/{} flash messages", messages.len());
        }
        Err(err) => log::warn!("toast: ignoring #{}: {err}", config.flash_messages_id),
    }
}

fn embedded_json(document: &Document, id: &str) -> Option<String> {
    document.get_element_by_id(id)?.text_content()
}
