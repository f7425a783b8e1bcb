//! Session save / load / clear over a key-value storage.

use std::collections::HashMap;
use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::domain::User;
use crate::error::AppError;

/// Storage key of the session record.
pub const SESSION_KEY: &str = "eventflow_user";

/// String key-value storage a session lives in.
pub trait SessionStorage: fmt::Debug {
    /// Returns the value stored under `key`.
    fn get_item(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&mut self, key: &str, value: String);

    /// Removes `key`. Removing an absent key is a no-op.
    fn remove_item(&mut self, key: &str);
}

/// In-process storage backed by a `HashMap`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    /// Creates an empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: String) {
        self.items.insert(key.to_string(), value);
    }

    fn remove_item(&mut self, key: &str) {
        self.items.remove(key);
    }
}

/// The session contract: at most one user record under [`SESSION_KEY`].
///
/// The record is encoded as JSON, then URL-safe base64 so that it is a valid
/// cookie value.
#[derive(Debug, Clone, Default)]
pub struct SessionStore<S> {
    storage: S,
}

impl<S: SessionStorage> SessionStore<S> {
    /// Wraps a storage.
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Stores `user` as the current session, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the record cannot be serialized.
    pub fn save(&mut self, user: &User) -> Result<(), AppError> {
        let json = serde_json::to_vec(user).map_err(|e| AppError::Internal(e.to_string()))?;
        self.storage.set_item(SESSION_KEY, URL_SAFE_NO_PAD.encode(json));
        Ok(())
    }

    /// Returns the current session user, if any.
    ///
    /// Malformed data is treated as "no session" and removed.
    pub fn load(&mut self) -> Option<User> {
        let raw = self.storage.get_item(SESSION_KEY)?;
        let decoded = URL_SAFE_NO_PAD
            .decode(raw.as_bytes())
            .ok()
            .and_then(|bytes| serde_json::from_slice::<User>(&bytes).ok());
        if decoded.is_none() {
            tracing::debug!("discarding malformed session");
            self.storage.remove_item(SESSION_KEY);
        }
        decoded
    }

    /// Ends the session.
    pub fn clear(&mut self) {
        self.storage.remove_item(SESSION_KEY);
    }

    /// Borrows the underlying storage.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Unwraps the underlying storage.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }
}
