//! Page components, each constructed once at startup.
//!
//! DESIGN
//! ======
//! Components own their element handles and capabilities as explicit fields
//! instead of closing over module globals, which keeps them constructible
//! against test doubles.

pub mod theme_controller;
pub mod toast_notifier;
