//! Key/value preference storage contract.
//!
//! Values are JSON text per key. The browser adapter wraps `localStorage`, which is synchronous,
//! so the contract is synchronous too.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Preference storage failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PrefsError {
    /// No storage backend is reachable (private mode, non-browser target).
    #[error("preference storage unavailable")]
    Unavailable,
    /// The backend refused the write.
    #[error("preference write failed: {0}")]
    Write(String),
    /// Stored text could not be decoded or a value could not be encoded.
    #[error("preference value could not be (de)serialized: {0}")]
    Codec(String),
}

/// Host service for small JSON preference values.
pub trait PrefsStore {
    /// Loads the raw JSON text stored under `key`.
    fn load_raw(&self, key: &str) -> Result<Option<String>, PrefsError>;

    /// Stores raw JSON text under `key`.
    fn save_raw(&self, key: &str, raw_json: &str) -> Result<(), PrefsError>;

    /// Removes `key`.
    fn remove(&self, key: &str) -> Result<(), PrefsError>;
}

/// In-memory preference store.
#[derive(Debug, Clone, Default)]
pub struct MemoryPrefsStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl PrefsStore for MemoryPrefsStore {
    fn load_raw(&self, key: &str) -> Result<Option<String>, PrefsError> {
        Ok(self.inner.borrow().get(key).cloned())
    }

    fn save_raw(&self, key: &str, raw_json: &str) -> Result<(), PrefsError> {
        self.inner
            .borrow_mut()
            .insert(key.to_string(), raw_json.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PrefsError> {
        self.inner.borrow_mut().remove(key);
        Ok(())
    }
}

/// Loads and decodes a typed preference.
///
/// # Errors
///
/// Returns [`PrefsError::Codec`] when the stored text is not valid JSON for `T`, or the store's
/// own error.
pub fn load_pref<T: DeserializeOwned>(
    store: &dyn PrefsStore,
    key: &str,
) -> Result<Option<T>, PrefsError> {
    let Some(raw) = store.load_raw(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| PrefsError::Codec(e.to_string()))
}

/// Encodes and stores a typed preference.
///
/// # Errors
///
/// Returns [`PrefsError::Codec`] when encoding fails, or the store's own error.
pub fn save_pref<T: Serialize>(
    store: &dyn PrefsStore,
    key: &str,
    value: &T,
) -> Result<(), PrefsError> {
    let raw = serde_json::to_string(value).map_err(|e| PrefsError::Codec(e.to_string()))?;
    store.save_raw(key, &raw)
}
