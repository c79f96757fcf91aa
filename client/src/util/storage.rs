//! Key-value persistence port and its browser / in-memory backends.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session store is written against [`KeyValueStorage`] rather than
//! `localStorage` directly, so the auth gate can be exercised natively with
//! [`MemoryStorage`] and SSR renders never touch browser globals.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Failure writing to the backing store.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("storage is not available in this environment")]
    Unavailable,
    #[error("storage write failed: {0}")]
    Write(String),
}

/// Origin-scoped string storage (the shape of `window.localStorage`).
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Option<String>;

    /// # Errors
    ///
    /// Returns an error when the backend refuses the write (quota, disabled
    /// storage, or no browser).
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove_item(&self, key: &str);
}

/// `window.localStorage` in hydrated builds; an always-empty store elsewhere.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl KeyValueStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            log::trace!("no localStorage to read {key} from");
            None
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        #[cfg(feature = "hydrate")]
        {
            let storage = local_storage().ok_or(StorageError::Unavailable)?;
            storage
                .set_item(key, value)
                .map_err(|e| StorageError::Write(format!("{e:?}")))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            log::trace!("no localStorage to write {key} ({} bytes) to", value.len());
            Err(StorageError::Unavailable)
        }
    }

    fn remove_item(&self, key: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                if let Err(e) = storage.remove_item(key) {
                    log::warn!("localStorage remove {key} failed: {e:?}");
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            log::trace!("no localStorage to remove {key} from");
        }
    }
}

/// In-process map. Clones share the same underlying entries.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl MemoryStorage {
    pub(crate) fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}
