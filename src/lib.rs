//! # ui-chrome
//!
//! Browser-side page chrome compiled to WebAssembly: a persisted light/dark
//! theme toggle and a toast notifier that renders transient alert cards.
//!
//! Everything that decides *what* happens lives in plain Rust behind small
//! traits (`KeyValueStore`, `ThemeView`, `ToastHost`, `Scheduler`, `Clock`)
//! so it runs under native `cargo test`. The `browser` module, compiled only
//! with the `hydrate` feature, binds those traits to `web-sys` and exposes the
//! page-facing globals.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`components`] | `ThemeController` and `ToastNotifier` |
//! | [`state`] | `Theme`, `ToastKind`, `Toast`, `ToastId` value types |
//! | [`util`] | HTML escaping, card markup, flash payload parsing |
//! | [`storage`] | Key-value storage capability and in-memory store |
//! | [`config`] | `UiConfig` element ids, keys, and timings |
//! | [`error`] | `UiError` |

pub mod components;
pub mod config;
pub mod error;
pub mod state;
pub mod storage;
pub mod util;

#[cfg(feature = "hydrate")]
pub mod browser;

pub use components::theme_controller::{ThemeController, ThemeView};
pub use components::toast_notifier::{Clock, Scheduler, TimerHandle, ToastHost, ToastNotifier};
pub use config::UiConfig;
pub use error::UiError;
pub use state::theme::Theme;
pub use state::toast::{Toast, ToastId, ToastKind};
pub use storage::{KeyValueStore, MemoryStore};
