//! Persisted admin session (`token` + `user`).
//!
//! DESIGN
//! ======
//! Pure storage: no token or role validation happens here. Both keys are
//! always written and removed together; a half-present pair reads as no
//! session at all.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::net::types::User;
use crate::util::storage::{KeyValueStorage, StorageError};

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

/// A token/user pair read back from storage.
#[derive(Clone, Debug, PartialEq)]
pub struct StoredSession {
    pub token: String,
    pub user: User,
}

/// Typed view over a [`KeyValueStorage`] backend.
#[derive(Clone, Debug, Default)]
pub struct SessionStore<S> {
    storage: S,
}

impl<S: KeyValueStorage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Persist both keys. A failed write leaves no partial session behind.
    ///
    /// # Errors
    ///
    /// Returns the storage error when either key cannot be written.
    pub fn save(&self, token: &str, user: &User) -> Result<(), StorageError> {
        let user_json = serde_json::to_string(user).map_err(|e| StorageError::Write(e.to_string()))?;
        let written = self
            .storage
            .set_item(TOKEN_KEY, token)
            .and_then(|()| self.storage.set_item(USER_KEY, &user_json));
        if let Err(e) = &written {
            log::warn!("session save failed: {e}");
            self.clear();
        }
        written
    }

    /// Both keys present and `user` parses, else `None`.
    pub fn load(&self) -> Option<StoredSession> {
        let token = self.storage.get_item(TOKEN_KEY)?;
        let raw_user = self.storage.get_item(USER_KEY)?;
        match serde_json::from_str::<User>(&raw_user) {
            Ok(user) => Some(StoredSession { token, user }),
            Err(e) => {
                log::info!("stored user is not valid JSON: {e}");
                None
            }
        }
    }

    /// Whether either key is present, parseable or not.
    pub fn has_any(&self) -> bool {
        self.storage.get_item(TOKEN_KEY).is_some() || self.storage.get_item(USER_KEY).is_some()
    }

    pub fn clear(&self) {
        self.storage.remove_item(TOKEN_KEY);
        self.storage.remove_item(USER_KEY);
    }
}
