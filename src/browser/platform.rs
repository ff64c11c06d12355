//! `web-sys` bindings for storage, timers, and the clock.

use gloo_timers::callback::Timeout;
use web_sys::{Storage, Window};

use crate::components::toast_notifier::{Clock, Scheduler, TimerHandle};
use crate::error::UiError;
use crate::storage::KeyValueStore;
use crate::util::page::MAX_TIMEOUT_MS;

/// `window.localStorage`, or nothing when the browser denies it (private
/// mode, sandboxed iframes). Without storage, reads come back empty and
/// writes fail.
pub struct LocalStorage {
    storage: Option<Storage>,
}

impl LocalStorage {
    pub fn open(window: &Window) -> Self {
        let storage = match window.local_storage() {
            Ok(Some(storage)) => Some(storage),
            Ok(None) => {
                log::warn!("storage: localStorage is not available");
                None
            }
            Err(err) => {
                log::warn!("{}", UiError::storage("opening localStorage", &err));
                None
            }
        };
        Self { storage }
    }
}

impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, UiError> {
        match &self.storage {
            Some(storage) => storage
                .get_item(key)
                .map_err(|err| UiError::storage("localStorage.getItem", &err)),
            None => Ok(None),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), UiError> {
        let storage = self.storage.as_ref().ok_or(UiError::StorageUnavailable)?;
        storage
            .set_item(key, value)
            .map_err(|err| UiError::storage("localStorage.setItem", &err))
    }
}

/// `setTimeout` through `gloo-timers`. Dropping a pending `Timeout` clears it.
#[derive(Clone, Copy, Debug, Default)]
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    type Handle = Timeout;

    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms.min(MAX_TIMEOUT_MS), callback)
    }
}

impl TimerHandle for Timeout {
    fn cancel(self) {
        drop(Timeout::cancel(self));
    }
}

/// `Date.now()`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DateClock;

impl Clock for DateClock {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn now_ms(&self) -> u64 {
        js_sys::Date::now() as u64
    }
}
