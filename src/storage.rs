//! Client-side string key-value storage.
//!
//! SYSTEM CONTEXT
//! ==============
//! The theme preference is the only persisted value. Components take the
//! store as a capability so tests run against [`MemoryStore`] and the browser
//! build plugs in `localStorage`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::UiError;

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

/// Get/set a string value by key.
pub trait KeyValueStore {
    /// Read `key`, returning `Ok(None)` when it was never written.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing store rejects the read.
    fn get_item(&self, key: &str) -> Result<Option<String>, UiError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing store rejects the write.
    fn set_item(&self, key: &str, value: &str) -> Result<(), UiError>;
}

/// In-memory store. Clones share the same entries, which lets a test build a
/// second component over the "same" storage to simulate a page reload.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, UiError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), UiError> {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
