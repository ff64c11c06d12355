//! Light/dark theme controller.
//!
//! Reads the persisted preference, reflects it onto the document root and the
//! toggle icon, and flips it on request. Missing storage or a missing icon are
//! ordinary states, not failures.
//!
//! TRADE-OFFS
//! ==========
//! The preference key is last-writer-wins: two tabs toggling concurrently may
//! disagree until the next page load. No cross-tab sync is attempted.

use std::cell::Cell;

use crate::config::UiConfig;
use crate::error::UiError;
use crate::state::theme::Theme;
use crate::storage::KeyValueStore;

#[cfg(test)]
#[path = "theme_controller_test.rs"]
mod theme_controller_test;

/// Visual surface the controller writes to.
pub trait ThemeView {
    /// Set `name="value"` on the document root element.
    ///
    /// # Errors
    ///
    /// Returns an error when the DOM rejects the attribute.
    fn set_root_attribute(&self, name: &str, value: &str) -> Result<(), UiError>;

    /// Replace class `remove` with `add` on the toggle icon.
    ///
    /// Returns `Ok(false)` when the page has no icon.
    ///
    /// # Errors
    ///
    /// Returns an error when the DOM rejects the class change.
    fn swap_icon_class(&self, remove: &str, add: &str) -> Result<bool, UiError>;
}

pub struct ThemeController<S, V> {
    config: UiConfig,
    store: S,
    view: V,
    /// Last theme painted on the page; stands in for the preference while
    /// storage holds nothing readable.
    applied: Cell<Option<Theme>>,
}

impl<S: KeyValueStore, V: ThemeView> ThemeController<S, V> {
    pub fn new(config: UiConfig, store: S, view: V) -> Self {
        Self {
            config,
            store,
            view,
            applied: Cell::new(None),
        }
    }

    /// Persisted preference. When storage has nothing (or cannot be read) the
    /// theme last applied by this controller is used, then light.
    #[must_use]
    pub fn current_theme(&self) -> Theme {
        match self.store.get_item(&self.config.storage_key) {
            Ok(Some(raw)) => Theme::from_stored(Some(&raw)),
            Ok(None) => self.applied_or_default(),
            Err(err) => {
                log::warn!("theme: reading preference failed: {err}");
                self.applied_or_default()
            }
        }
    }

    /// Apply `theme` to the root and the icon, then persist it.
    ///
    /// # Errors
    ///
    /// Returns the first failing step. Visual updates come first, so the page
    /// repaints even when persistence fails.
    pub fn set_theme(&self, theme: Theme) -> Result<(), UiError> {
        self.view
            .set_root_attribute(&self.config.theme_attribute, theme.as_str())?;
        self.update_icon(theme)?;
        self.applied.set(Some(theme));
        self.store.set_item(&self.config.storage_key, theme.as_str())?;
        log::debug!("theme: applied {theme}");
        Ok(())
    }

    /// Flip the persisted theme and return the new one.
    ///
    /// # Errors
    ///
    /// Propagates [`Self::set_theme`] failures.
    pub fn toggle_theme(&self) -> Result<Theme, UiError> {
        let next = self.current_theme().toggled();
        self.set_theme(next)?;
        Ok(next)
    }

    /// Apply the persisted (or default) theme. Run once the document is ready.
    ///
    /// # Errors
    ///
    /// Propagates [`Self::set_theme`] failures.
    pub fn init_theme(&self) -> Result<Theme, UiError> {
        let theme = self.current_theme();
        self.set_theme(theme)?;
        Ok(theme)
    }

    #[must_use]
    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn view(&self) -> &V {
        &self.view
    }

    fn applied_or_default(&self) -> Theme {
        self.applied.get().unwrap_or_default()
    }

    fn update_icon(&self, theme: Theme) -> Result<(), UiError> {
        let shown = self.config.icon_class(theme);
        let hidden = self.config.icon_class(theme.toggled());
        if !self.view.swap_icon_class(hidden, shown)? {
            log::trace!("theme: no toggle icon on page");
        }
        Ok(())
    }
}
