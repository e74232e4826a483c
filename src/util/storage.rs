//! Durable key-value store holding the session credential.
//!
//! SYSTEM CONTEXT
//! ==============
//! In the browser this is `window.localStorage`: it survives reloads and is
//! scoped to the page origin. The session manager owns every write; the
//! request helper reads the token and clears it only when the authority
//! rejects it.
//!
//! Layout: `token` holds the raw bearer credential. `user` optionally holds a
//! JSON-serialized `SessionUser` when identity caching is enabled.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::cell::RefCell;
use std::collections::HashMap;

use crate::net::types::SessionUser;

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

/// Errors from durable-store writes.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("storage is not available")]
    Unavailable,

    #[error("storage write failed: {0}")]
    Write(String),
}

/// Synchronous string key-value store.
pub trait CredentialStore {
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the backing store rejects the write
    /// (quota exceeded, storage disabled).
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str);

    /// The persisted credential. Blank values count as absent.
    fn token(&self) -> Option<String> {
        self.get(TOKEN_KEY).filter(|token| !token.trim().is_empty())
    }

    /// Persist the credential.
    ///
    /// # Errors
    ///
    /// Propagates the backing store's write failure.
    fn save_token(&self, token: &str) -> Result<(), StorageError> {
        self.set(TOKEN_KEY, token)
    }

    /// Cached identity, if one is stored and parses.
    ///
    /// A malformed value is removed so it cannot shadow the next login.
    fn cached_user(&self) -> Option<SessionUser> {
        let raw = self.get(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                leptos::logging::warn!("discarding malformed cached user: {e}");
                self.remove(USER_KEY);
                None
            }
        }
    }

    /// Cache the identity next to the credential.
    ///
    /// # Errors
    ///
    /// Propagates the backing store's write failure.
    fn save_cached_user(&self, user: &SessionUser) -> Result<(), StorageError> {
        let raw = serde_json::to_string(user).map_err(|e| StorageError::Write(e.to_string()))?;
        self.set(USER_KEY, &raw)
    }

    /// Remove the credential and any cached identity.
    fn clear_session(&self) {
        self.remove(TOKEN_KEY);
        self.remove(USER_KEY);
    }
}

/// `window.localStorage`. Reads return `None` and writes fail outside a browser.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl CredentialStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        #[cfg(feature = "hydrate")]
        {
            let storage = local_storage().ok_or(StorageError::Unavailable)?;
            storage
                .set_item(key, value)
                .map_err(|e| StorageError::Write(format!("{e:?}")))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
            Err(StorageError::Unavailable)
        }
    }

    fn remove(&self, key: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(key);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
        }
    }
}

/// Process-local store for server rendering and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a credential.
    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        store.entries.borrow_mut().insert(TOKEN_KEY.to_owned(), token.to_owned());
        store
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}
