//! Pure helpers shared by the components.
//!
//! SYSTEM CONTEXT
//! ==============
//! String work (escaping, markup, payload parsing) stays free of `web-sys` so
//! it is covered by native tests.

pub mod flash;
pub mod html;
pub mod page;
