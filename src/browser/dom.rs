//! Live-document implementations of `ThemeView` and `ToastHost`.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, Event};

use super::BrowserNotifier;
use crate::components::theme_controller::ThemeView;
use crate::components::toast_notifier::ToastHost;
use crate::config::UiConfig;
use crate::error::UiError;
use crate::state::toast::{Toast, ToastId};

/// Root element plus the optional toggle icon, captured once the document is ready.
pub struct DomThemeView {
    root: Element,
    icon: Option<Element>,
}

impl DomThemeView {
    /// # Errors
    ///
    /// Returns [`UiError::MissingElement`] when the document has no root element.
    pub fn new(document: &Document, config: &UiConfig) -> Result<Self, UiError> {
        let root = document
            .document_element()
            .ok_or_else(|| UiError::MissingElement("html".to_owned()))?;
        let icon = document.get_element_by_id(&config.icon_id);
        Ok(Self { root, icon })
    }
}

impl ThemeView for DomThemeView {
    fn set_root_attribute(&self, name: &str, value: &str) -> Result<(), UiError> {
        self.root
            .set_attribute(name, value)
            .map_err(|err| UiError::dom("set root attribute", &err))
    }

    fn swap_icon_class(&self, remove: &str, add: &str) -> Result<bool, UiError> {
        let Some(icon) = &self.icon else {
            return Ok(false);
        };
        let classes = icon.class_list();
        classes
            .remove_1(remove)
            .map_err(|err| UiError::dom("icon classList.remove", &err))?;
        classes
            .add_1(add)
            .map_err(|err| UiError::dom("icon classList.add", &err))?;
        Ok(true)
    }
}

/// Toast container looked up by id on every call, so a container rendered
/// after startup (or swapped out by the page) is still found.
pub struct DomToastHost {
    document: Document,
    container_id: String,
}

impl DomToastHost {
    pub fn new(document: Document, container_id: &str) -> Self {
        Self {
            document,
            container_id: container_id.to_owned(),
        }
    }

    fn card(&self, id: &ToastId) -> Result<Element, UiError> {
        self.document
            .get_element_by_id(id.as_str())
            .ok_or_else(|| UiError::MissingElement(id.to_string()))
    }
}

impl ToastHost for DomToastHost {
    fn append_card(&self, _toast: &Toast, markup: &str) -> Result<(), UiError> {
        let container = self
            .document
            .get_element_by_id(&self.container_id)
            .ok_or_else(|| UiError::MissingElement(self.container_id.clone()))?;
        container
            .insert_adjacent_html("beforeend", markup)
            .map_err(|err| UiError::dom("append toast", &err))
    }

    fn show_card(&self, id: &ToastId) -> Result<(), UiError> {
        self.card(id)?
            .class_list()
            .add_2("fade", "show")
            .map_err(|err| UiError::dom("show toast", &err))
    }

    /// Bootstrap's stylesheet fades `.toast.showing` to zero opacity.
    fn hide_card(&self, id: &ToastId) -> Result<(), UiError> {
        self.card(id)?
            .class_list()
            .add_1("showing")
            .map_err(|err| UiError::dom("hide toast", &err))
    }

    fn remove_card(&self, id: &ToastId) {
        if let Some(card) = self.document.get_element_by_id(id.as_str()) {
            card.remove();
        }
    }
}

/// Route clicks on any toast close button to [`BrowserNotifier::dismiss`]
/// through a single document-level listener.
pub(super) fn listen_for_dismiss(document: &Document, notifier: &BrowserNotifier) -> Result<(), UiError> {
    let notifier = notifier.clone();
    let on_click = Closure::wrap(Box::new(move |event: Event| {
        let Some(card) = dismissed_card(&event) else {
            return;
        };
        let id = ToastId::from(card.id());
        if !notifier.dismiss(&id) {
            log::trace!("toast: {id} already hiding");
        }
    }) as Box<dyn FnMut(Event)>);
    document
        .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
        .map_err(|err| UiError::dom("dismiss listener", &err))?;
    on_click.forget();
    Ok(())
}

fn dismissed_card(event: &Event) -> Option<Element> {
    let Ok(target) = event.target()?.dyn_into::<Element>() else {
        return None;
    };
    let Ok(Some(button)) = target.closest(r#"[data-bs-dismiss="toast"]"#) else {
        return None;
    };
    match button.closest(".toast") {
        Ok(card) => card,
        Err(_) => None,
    }
}
