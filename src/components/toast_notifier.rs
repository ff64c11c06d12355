//! Toast notifier: appends categorized cards to the page container and
//! removes them after their display time.
//!
//! SYSTEM CONTEXT
//! ==============
//! Page scripts call the `showToast` family of globals; the browser layer
//! forwards them here. Every call is independent and additive, so toasts
//! stack in creation order.
//!
//! LIFECYCLE
//! =========
//! `append` -> `show` -> (duration elapses or close clicked) -> `hide` ->
//! (hide transition elapses) -> `remove`. Each live toast owns exactly one
//! pending timer handle at a time, so dismissing or clearing cancels
//! deterministically.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::config::UiConfig;
use crate::error::UiError;
use crate::state::toast::{Toast, ToastId, ToastKind};
use crate::util::flash::FlashMessage;
use crate::util::html::render_toast_card;

#[cfg(test)]
#[path = "toast_notifier_test.rs"]
mod toast_notifier_test;

/// Container that holds toast cards.
pub trait ToastHost {
    /// Append the rendered card for `toast` at the end of the container.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::MissingElement`] when the container is absent.
    fn append_card(&self, toast: &Toast, markup: &str) -> Result<(), UiError>;

    /// Start the entrance transition.
    ///
    /// # Errors
    ///
    /// Returns an error when the card cannot be found or restyled.
    fn show_card(&self, id: &ToastId) -> Result<(), UiError>;

    /// Start the exit transition.
    ///
    /// # Errors
    ///
    /// Returns an error when the card cannot be found or restyled.
    fn hide_card(&self, id: &ToastId) -> Result<(), UiError>;

    /// Detach the card from the document. Unknown ids are ignored.
    fn remove_card(&self, id: &ToastId);
}

/// One-shot timer owned by its creator.
pub trait TimerHandle {
    /// Prevent the callback from running. No effect once it has run.
    fn cancel(self);
}

pub trait Scheduler {
    type Handle: TimerHandle;

    /// Run `callback` once after `delay_ms`.
    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Self::Handle;
}

/// Wall-clock milliseconds used to derive toast ids.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Shown,
    Hiding,
}

struct LiveToast<T> {
    id: ToastId,
    phase: Phase,
    timer: Option<T>,
}

struct Inner<H, S: Scheduler, C> {
    config: UiConfig,
    host: H,
    scheduler: S,
    clock: C,
    last_id_ms: Cell<Option<u64>>,
    live: RefCell<Vec<LiveToast<S::Handle>>>,
}

/// Cheap-to-clone handle; clones drive the same set of toasts.
pub struct ToastNotifier<H, S: Scheduler, C> {
    inner: Rc<Inner<H, S, C>>,
}

impl<H, S: Scheduler, C> Clone for ToastNotifier<H, S, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<H, S, C> ToastNotifier<H, S, C>
where
    H: ToastHost + 'static,
    S: Scheduler + 'static,
    C: Clock + 'static,
{
    pub fn new(config: UiConfig, host: H, scheduler: S, clock: C) -> Self {
        Self {
            inner: Rc::new(Inner {
                config,
                host,
                scheduler,
                clock,
                last_id_ms: Cell::new(None),
                live: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Show `message` as a toast.
    ///
    /// `category` is normalized (`None` means info) and `duration_ms` falls
    /// back to the configured default. Returns `None`, after logging, when the
    /// container is missing or the card could not be appended.
    pub fn show_toast(
        &self,
        message: &str,
        category: Option<&str>,
        duration_ms: Option<u32>,
    ) -> Option<ToastId> {
        let kind = category.map_or(ToastKind::Info, ToastKind::normalize);
        self.show_kind(message, kind, duration_ms)
    }

    pub fn show_success(&self, message: &str, duration_ms: Option<u32>) -> Option<ToastId> {
        self.show_kind(message, ToastKind::Success, duration_ms)
    }

    pub fn show_error(&self, message: &str, duration_ms: Option<u32>) -> Option<ToastId> {
        self.show_kind(message, ToastKind::Error, duration_ms)
    }

    pub fn show_warning(&self, message: &str, duration_ms: Option<u32>) -> Option<ToastId> {
        self.show_kind(message, ToastKind::Warning, duration_ms)
    }

    pub fn show_info(&self, message: &str, duration_ms: Option<u32>) -> Option<ToastId> {
        self.show_kind(message, ToastKind::Info, duration_ms)
    }

    /// Replay server flash messages in order; returns how many were shown.
    pub fn show_flashes(&self, messages: &[FlashMessage]) -> usize {
        messages
            .iter()
            .filter_map(|flash| self.show_toast(&flash.message, Some(flash.category.as_str()), None))
            .count()
    }

    /// Hide a toast now instead of waiting for its timer.
    ///
    /// Returns `false` when the toast is unknown or already hiding.
    pub fn dismiss(&self, id: &ToastId) -> bool {
        let pending = {
            let mut live = self.inner.live.borrow_mut();
            match live.iter_mut().find(|t| &t.id == id && t.phase == Phase::Shown) {
                Some(toast) => toast.timer.take(),
                None => return false,
            }
        };
        if let Some(timer) = pending {
            timer.cancel();
        }
        log::debug!("toast: {id} dismissed");
        begin_hide(&self.inner, id);
        true
    }

    /// Cancel every pending timer and remove every live card.
    pub fn clear(&self) {
        let drained = std::mem::take(&mut *self.inner.live.borrow_mut());
        for toast in drained {
            if let Some(timer) = toast.timer {
                timer.cancel();
            }
            self.inner.host.remove_card(&toast.id);
        }
    }

    /// Ids of toasts still in the container, oldest first.
    #[must_use]
    pub fn live_ids(&self) -> Vec<ToastId> {
        self.inner.live.borrow().iter().map(|t| t.id.clone()).collect()
    }

    #[must_use]
    pub fn live_count(&self) -> usize {
        self.inner.live.borrow().len()
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.inner.host
    }

    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.inner.scheduler
    }

    #[must_use]
    pub fn config(&self) -> &UiConfig {
        &self.inner.config
    }

    fn show_kind(&self, message: &str, kind: ToastKind, duration_ms: Option<u32>) -> Option<ToastId> {
        let duration_ms = duration_ms.unwrap_or(self.inner.config.default_duration_ms);
        match self.present(message, kind, duration_ms) {
            Ok(id) => Some(id),
            Err(err) if err.is_missing_element() => {
                log::error!("toast: container not found ({err}), dropping {kind} toast");
                None
            }
            Err(err) => {
                log::error!("toast: could not show {kind} toast: {err}");
                None
            }
        }
    }

    fn present(&self, message: &str, kind: ToastKind, duration_ms: u32) -> Result<ToastId, UiError> {
        let toast = Toast {
            id: self.next_id(),
            kind,
            message: message.to_owned(),
            duration_ms,
        };
        let markup = render_toast_card(&toast);
        self.inner.host.append_card(&toast, &markup)?;
        if let Err(err) = self.inner.host.show_card(&toast.id) {
            log::warn!("toast: entrance for {} failed: {err}", toast.id);
        }

        let timer = schedule_for(&self.inner, &toast.id, duration_ms, begin_hide);
        self.inner.live.borrow_mut().push(LiveToast {
            id: toast.id.clone(),
            phase: Phase::Shown,
            timer: Some(timer),
        });
        log::debug!("toast: {} shown as {kind} for {duration_ms}ms", toast.id);
        Ok(toast.id)
    }

    /// Millisecond ids, bumped past the previous one when the clock has not
    /// advanced so rapid calls never collide.
    fn next_id(&self) -> ToastId {
        let now = self.inner.clock.now_ms();
        let millis = match self.inner.last_id_ms.get() {
            Some(last) if now <= last => last + 1,
            _ => now,
        };
        self.inner.last_id_ms.set(Some(millis));
        ToastId::from_millis(millis)
    }
}

/// Schedule `step` for toast `id`. The callback holds a weak reference, so
/// timers left behind by a dropped notifier do nothing.
fn schedule_for<H, S, C>(
    inner: &Rc<Inner<H, S, C>>,
    id: &ToastId,
    delay_ms: u32,
    step: fn(&Rc<Inner<H, S, C>>, &ToastId),
) -> S::Handle
where
    H: ToastHost + 'static,
    S: Scheduler + 'static,
    C: Clock + 'static,
{
    let weak: Weak<Inner<H, S, C>> = Rc::downgrade(inner);
    let id = id.clone();
    inner.scheduler.schedule(
        delay_ms,
        Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                step(&inner, &id);
            }
        }),
    )
}

fn begin_hide<H, S, C>(inner: &Rc<Inner<H, S, C>>, id: &ToastId)
where
    H: ToastHost + 'static,
    S: Scheduler + 'static,
    C: Clock + 'static,
{
    {
        let mut live = inner.live.borrow_mut();
        let Some(toast) = live.iter_mut().find(|t| &t.id == id) else {
            return;
        };
        if toast.phase == Phase::Hiding {
            return;
        }
        toast.phase = Phase::Hiding;
        toast.timer = None;
    }

    if let Err(err) = inner.host.hide_card(id) {
        log::warn!("toast: exit transition for {id} failed: {err}");
    }
    let timer = schedule_for(inner, id, inner.config.hide_transition_ms, finish_hide);
    if let Some(toast) = inner.live.borrow_mut().iter_mut().find(|t| &t.id == id) {
        toast.timer = Some(timer);
    }
}

/// The "finished hiding" signal: drop the card from the document.
fn finish_hide<H, S, C>(inner: &Rc<Inner<H, S, C>>, id: &ToastId)
where
    H: ToastHost + 'static,
    S: Scheduler + 'static,
    C: Clock + 'static,
{
    let removed = {
        let mut live = inner.live.borrow_mut();
        let index = live.iter().position(|t| &t.id == id);
        index.map(|index| live.remove(index))
    };
    if removed.is_some() {
        inner.host.remove_card(id);
        log::trace!("toast: {id} removed");
    }
}
