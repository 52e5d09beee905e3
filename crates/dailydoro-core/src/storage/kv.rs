//! Key-value persistence seam.
//!
//! Values are JSON documents rewritten in full on every change. Failures are
//! absorbed by the helpers here: callers keep their in-memory state and a
//! warning is logged.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::StorageError;

/// Key holding the session history array.
pub const HISTORY_KEY: &str = "session_history";
/// Key holding the daily task array.
pub const TASKS_KEY: &str = "daily_tasks";

/// Synchronous string key-value store.
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: KvStore + ?Sized> KvStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// In-process store. Used by tests and when the database is unavailable.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Key holding the last damaged copy of `key`.
pub(crate) fn backup_key(key: &str) -> String {
    format!("{key}.bak")
}

/// Read `key` as a JSON array and decode each element on its own.
///
/// Missing or unreadable values yield an empty list. `null` elements and
/// elements that fail to decode come back as `None` so callers keep the
/// rest. When anything other than `null` is dropped, the raw text is
/// copied to [`backup_key`] before the caller's next write replaces it.
pub(crate) fn load_json_array<T: DeserializeOwned>(
    store: &impl KvStore,
    key: &str,
) -> Vec<Option<T>> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to read persisted state");
            return Vec::new();
        }
    };
    let items: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(key, error = %e, "persisted state is not a list");
            back_up(store, key, &raw);
            return Vec::new();
        }
    };

    let mut dropped = 0usize;
    let decoded: Vec<Option<T>> = items
        .into_iter()
        .map(|item| {
            if item.is_null() {
                return None;
            }
            match serde_json::from_value(item) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!(key, error = %e, "skipping malformed persisted item");
                    dropped += 1;
                    None
                }
            }
        })
        .collect();
    if dropped > 0 {
        back_up(store, key, &raw);
    }
    decoded
}

fn back_up(store: &impl KvStore, key: &str, raw: &str) {
    let backup = backup_key(key);
    match store.set(&backup, raw) {
        Ok(()) => tracing::warn!(key, backup = %backup, "damaged state copied aside"),
        Err(e) => tracing::warn!(key, error = %e, "failed to copy damaged state"),
    }
}

/// Encode and write `value` under `key`. Returns whether it was persisted.
pub(crate) fn save_json<T: Serialize + ?Sized>(store: &impl KvStore, key: &str, value: &T) -> bool {
    let json = match serde_json::to_string(value) {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to encode state");
            return false;
        }
    };
    match store.set(key, &json) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(key, error = %e, "state kept in memory only");
            false
        }
    }
}

/// Remove `key`. Returns whether the store accepted the removal.
pub(crate) fn remove_key(store: &impl KvStore, key: &str) -> bool {
    match store.remove(key) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to remove persisted state");
            false
        }
    }
}
