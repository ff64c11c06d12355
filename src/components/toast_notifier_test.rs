use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::*;
use crate::util::flash::parse_flash_messages;

// =============================================================
// Test doubles
// =============================================================

#[derive(Clone, Debug, PartialEq, Eq)]
struct Card {
    id: ToastId,
    kind: ToastKind,
    message: String,
    markup: String,
    visible: bool,
}

/// In-memory container. `None` models a page without one.
#[derive(Default)]
struct MemoryHost {
    cards: RefCell<Option<Vec<Card>>>,
}

impl MemoryHost {
    fn with_container() -> Self {
        Self {
            cards: RefCell::new(Some(Vec::new())),
        }
    }

    fn without_container() -> Self {
        Self::default()
    }

    fn cards(&self) -> Vec<Card> {
        self.cards.borrow().clone().unwrap_or_default()
    }

    fn card(&self, id: &ToastId) -> Option<Card> {
        self.cards().into_iter().find(|c| &c.id == id)
    }
}

impl ToastHost for MemoryHost {
    fn append_card(&self, toast: &Toast, markup: &str) -> Result<(), UiError> {
        let mut cards = self.cards.borrow_mut();
        let Some(cards) = cards.as_mut() else {
            return Err(UiError::MissingElement("toastContainer".to_owned()));
        };
        cards.push(Card {
            id: toast.id.clone(),
            kind: toast.kind,
            message: toast.message.clone(),
            markup: markup.to_owned(),
            visible: false,
        });
        Ok(())
    }

    fn show_card(&self, id: &ToastId) -> Result<(), UiError> {
        self.set_visible(id, true)
    }

    fn hide_card(&self, id: &ToastId) -> Result<(), UiError> {
        self.set_visible(id, false)
    }

    fn remove_card(&self, id: &ToastId) {
        if let Some(cards) = self.cards.borrow_mut().as_mut() {
            cards.retain(|c| &c.id != id);
        }
    }
}

impl MemoryHost {
    fn set_visible(&self, id: &ToastId, visible: bool) -> Result<(), UiError> {
        let mut cards = self.cards.borrow_mut();
        let card = cards
            .as_mut()
            .and_then(|cards| cards.iter_mut().find(|c| &c.id == id))
            .ok_or_else(|| UiError::MissingElement(id.to_string()))?;
        card.visible = visible;
        Ok(())
    }
}

struct Pending {
    id: u64,
    due: u64,
    callback: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct Queue {
    now: u64,
    next_id: u64,
    pending: Vec<Pending>,
}

/// Virtual-time scheduler advanced explicitly by the test.
#[derive(Clone, Default)]
struct ManualScheduler {
    queue: Rc<RefCell<Queue>>,
}

struct ManualHandle {
    id: u64,
    queue: Rc<RefCell<Queue>>,
}

impl TimerHandle for ManualHandle {
    fn cancel(self) {
        self.queue.borrow_mut().pending.retain(|p| p.id != self.id);
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualHandle;

    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> ManualHandle {
        let mut queue = self.queue.borrow_mut();
        queue.next_id += 1;
        let id = queue.next_id;
        let due = queue.now + u64::from(delay_ms);
        queue.pending.push(Pending { id, due, callback });
        ManualHandle {
            id,
            queue: Rc::clone(&self.queue),
        }
    }
}

impl ManualScheduler {
    /// Run every callback due within the next `ms`, in due order.
    fn advance(&self, ms: u64) {
        let target = self.queue.borrow().now + ms;
        loop {
            let next = {
                let mut queue = self.queue.borrow_mut();
                let index = queue
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| p.due <= target)
                    .min_by_key(|(_, p)| (p.due, p.id))
                    .map(|(index, _)| index);
                index.map(|index| {
                    let pending = queue.pending.remove(index);
                    queue.now = pending.due;
                    pending
                })
            };
            match next {
                Some(pending) => (pending.callback)(),
                None => break,
            }
        }
        self.queue.borrow_mut().now = target;
    }

    fn pending(&self) -> usize {
        self.queue.borrow().pending.len()
    }
}

/// Clock that only moves when told to.
#[derive(Clone, Default)]
struct FixedClock {
    now: Rc<Cell<u64>>,
}

impl FixedClock {
    fn at(ms: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(ms)),
        }
    }

    fn set(&self, ms: u64) {
        self.now.set(ms);
    }
}

impl Clock for FixedClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

type TestNotifier = ToastNotifier<MemoryHost, ManualScheduler, FixedClock>;

fn notifier_with(host: MemoryHost, clock: FixedClock) -> TestNotifier {
    ToastNotifier::new(UiConfig::default(), host, ManualScheduler::default(), clock)
}

fn notifier() -> TestNotifier {
    notifier_with(MemoryHost::with_container(), FixedClock::at(1_000))
}

// =============================================================
// show_toast
// =============================================================

#[test]
fn show_toast_appends_one_card() {
    let n = notifier();
    let id = n.show_toast("Hello", Some("success"), None).expect("shown");

    let cards = n.host().cards();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].id, id);
    assert_eq!(cards[0].kind, ToastKind::Success);
    assert_eq!(cards[0].message, "Hello");
    assert!(cards[0].visible);
    assert!(cards[0].markup.contains(r#"<div class="toast-body">Hello</div>"#));
}

#[test]
fn show_toast_renders_markup_as_literal_text() {
    let n = notifier();
    let id = n
        .show_toast("<script>x</script>", Some("info"), None)
        .expect("shown");
    let card = n.host().card(&id).expect("card");
    assert!(card.markup.contains("&lt;script&gt;x&lt;/script&gt;"));
    assert!(!card.markup.contains("<script>"));
}

#[test]
fn show_toast_normalizes_danger_to_error() {
    let n = notifier();
    let id = n.show_toast("x", Some("danger"), None).expect("shown");
    let card = n.host().card(&id).expect("card");
    assert_eq!(card.kind, ToastKind::Error);
    assert!(card.markup.contains("toast-error"));
    assert!(card.markup.contains(">Error</strong>"));
}

#[test]
fn show_toast_unknown_category_falls_back_to_info() {
    let n = notifier();
    let id = n.show_toast("x", Some("bogus-category"), None).expect("shown");
    let card = n.host().card(&id).expect("card");
    assert_eq!(card.kind, ToastKind::Info);
    assert!(card.markup.contains("bi-info-circle-fill"));
}

#[test]
fn show_toast_defaults_to_info() {
    let n = notifier();
    let id = n.show_toast("x", None, None).expect("shown");
    assert_eq!(n.host().card(&id).expect("card").kind, ToastKind::Info);
}

#[test]
fn wrappers_force_their_category() {
    let n = notifier();
    let ids = [
        n.show_success("a", None),
        n.show_error("b", None),
        n.show_warning("c", None),
        n.show_info("d", None),
    ];
    let kinds: Vec<_> = n.host().cards().iter().map(|c| c.kind).collect();
    assert!(ids.iter().all(Option::is_some));
    assert_eq!(kinds, ToastKind::ALL.to_vec());
}

#[test]
fn missing_container_is_a_noop() {
    let n = notifier_with(MemoryHost::without_container(), FixedClock::at(1_000));
    assert_eq!(n.show_toast("Hello", Some("success"), None), None);
    assert_eq!(n.live_count(), 0);
    assert_eq!(n.scheduler().pending(), 0);
    assert!(n.host().cards().is_empty());
}

#[test]
fn toasts_stack_in_creation_order() {
    let clock = FixedClock::at(1_000);
    let n = notifier_with(MemoryHost::with_container(), clock.clone());
    let first = n.show_info("first", None).expect("first");
    clock.set(1_010);
    let second = n.show_info("second", None).expect("second");

    let ids: Vec<_> = n.host().cards().into_iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![first.clone(), second.clone()]);
    assert_eq!(n.live_ids(), vec![first, second]);
}

// =============================================================
// Identifiers
// =============================================================

#[test]
fn ids_derive_from_clock() {
    let n = notifier_with(MemoryHost::with_container(), FixedClock::at(1_700_000_000_000));
    let id = n.show_info("x", None).expect("shown");
    assert_eq!(id.as_str(), "toast-1700000000000");
}

#[test]
fn ids_stay_unique_within_one_millisecond() {
    let n = notifier();
    let a = n.show_info("a", None).expect("a");
    let b = n.show_info("b", None).expect("b");
    let c = n.show_info("c", None).expect("c");
    assert_eq!(a.as_str(), "toast-1000");
    assert_eq!(b.as_str(), "toast-1001");
    assert_eq!(c.as_str(), "toast-1002");
}

#[test]
fn ids_never_go_backwards_when_clock_does() {
    let clock = FixedClock::at(5_000);
    let n = notifier_with(MemoryHost::with_container(), clock.clone());
    n.show_info("a", None).expect("a");
    clock.set(4_000);
    let b = n.show_info("b", None).expect("b");
    assert_eq!(b.as_str(), "toast-5001");
}

// =============================================================
// Auto-dismiss lifecycle
// =============================================================

#[test]
fn card_is_removed_after_duration_and_hide_transition() {
    let n = notifier();
    let baseline = n.host().cards().len();
    let id = n.show_toast("Hello", Some("success"), None).expect("shown");

    n.scheduler().advance(4_999);
    assert!(n.host().card(&id).expect("still shown").visible);

    n.scheduler().advance(1);
    let hiding = n.host().card(&id).expect("still attached while hiding");
    assert!(!hiding.visible);

    n.scheduler().advance(u64::from(DEFAULT_HIDE_MS));
    assert_eq!(n.host().cards().len(), baseline);
    assert_eq!(n.live_count(), 0);
    assert_eq!(n.scheduler().pending(), 0);
}

const DEFAULT_HIDE_MS: u32 = crate::config::DEFAULT_HIDE_TRANSITION_MS;

#[test]
fn custom_duration_is_honored() {
    let n = notifier();
    let id = n.show_warning("quick", Some(200)).expect("shown");
    n.scheduler().advance(200);
    assert!(!n.host().card(&id).expect("hiding").visible);
    n.scheduler().advance(u64::from(DEFAULT_HIDE_MS));
    assert!(n.host().card(&id).is_none());
}

#[test]
fn configured_default_duration_applies() {
    let config = UiConfig {
        default_duration_ms: 1_000,
        ..UiConfig::default()
    };
    let n = ToastNotifier::new(
        config,
        MemoryHost::with_container(),
        ManualScheduler::default(),
        FixedClock::at(0),
    );
    let id = n.show_info("x", None).expect("shown");
    n.scheduler().advance(1_000);
    assert!(!n.host().card(&id).expect("hiding").visible);
}

#[test]
fn toasts_expire_independently() {
    let n = notifier();
    let short = n.show_info("short", Some(100)).expect("short");
    let long = n.show_info("long", Some(10_000)).expect("long");

    n.scheduler().advance(1_000);
    assert!(n.host().card(&short).is_none());
    assert!(n.host().card(&long).expect("long").visible);
    assert_eq!(n.live_ids(), vec![long]);
}

// =============================================================
// Manual dismiss / clear
// =============================================================

#[test]
fn dismiss_cancels_timer_and_hides_now() {
    let n = notifier();
    let id = n.show_info("x", None).expect("shown");

    assert!(n.dismiss(&id));
    assert!(!n.host().card(&id).expect("hiding").visible);
    assert_eq!(n.scheduler().pending(), 1);

    n.scheduler().advance(u64::from(DEFAULT_HIDE_MS));
    assert!(n.host().card(&id).is_none());
    assert_eq!(n.scheduler().pending(), 0);
}

#[test]
fn dismiss_twice_or_unknown_is_rejected() {
    let n = notifier();
    let id = n.show_info("x", None).expect("shown");
    assert!(n.dismiss(&id));
    assert!(!n.dismiss(&id));
    assert!(!n.dismiss(&ToastId::from("toast-0")));
}

#[test]
fn clear_removes_everything_and_cancels_timers() {
    let n = notifier();
    n.show_info("a", None).expect("a");
    let b = n.show_info("b", None).expect("b");
    n.dismiss(&b);

    n.clear();
    assert!(n.host().cards().is_empty());
    assert_eq!(n.live_count(), 0);
    assert_eq!(n.scheduler().pending(), 0);
}

#[test]
fn dropped_notifier_leaves_timers_inert() {
    let scheduler = ManualScheduler::default();
    let n = ToastNotifier::new(
        UiConfig::default(),
        MemoryHost::with_container(),
        scheduler.clone(),
        FixedClock::at(0),
    );
    n.show_info("x", None).expect("shown");
    drop(n);
    scheduler.advance(10_000);
    assert_eq!(scheduler.pending(), 0);
}

// =============================================================
// Flash replay
// =============================================================

#[test]
fn flashes_replay_in_order_with_normalized_categories() {
    let n = notifier();
    let flashes = parse_flash_messages(
        r#"[["success","Registration successful! Please log in."],["danger","Bad password"],["message","Hi"]]"#,
    )
    .expect("payload");

    assert_eq!(n.show_flashes(&flashes), 3);
    let kinds: Vec<_> = n.host().cards().iter().map(|c| c.kind).collect();
    assert_eq!(kinds, vec![ToastKind::Success, ToastKind::Error, ToastKind::Info]);
}

#[test]
fn flashes_without_container_show_nothing() {
    let n = notifier_with(MemoryHost::without_container(), FixedClock::at(0));
    let flashes = parse_flash_messages(r#"[["info","x"]]"#).expect("payload");
    assert_eq!(n.show_flashes(&flashes), 0);
}
