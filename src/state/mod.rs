//! Value types shared by the components.
//!
//! DESIGN
//! ======
//! Split by component (`theme`, `toast`) so each controller depends only on
//! the small model it drives.

pub mod theme;
pub mod toast;
