//! Session-scoped handoff of fetched results between pages.
//!
//! The browser keeps values in `sessionStorage`, so they disappear with the
//! tab. The native build keeps them in process memory for the lifetime of the
//! app window.

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Key of the last single-person result.
pub const RESULT_KEY: &str = "result";
/// Key of the last compatibility result.
pub const COMPATIBILITY_RESULT_KEY: &str = "compatibility-result";

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    /// Nothing usable under the key. Malformed payloads land here too.
    #[error("no stored result under `{0}`")]
    NotFound(String),
    #[error("session storage unavailable")]
    Unavailable,
    #[error("could not serialise result: {0}")]
    Serialize(String),
}

/// Raw string storage underneath [`ResultStore`].
pub trait SessionBackend {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

pub struct ResultStore<B: SessionBackend> {
    backend: B,
}

impl<B: SessionBackend> ResultStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<T, StoreError> {
        let raw = self
            .backend
            .get(key)
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;
        serde_json::from_str(&raw).map_err(|err| {
            log::warn!("Discarding malformed stored value under `{key}`: {err}");
            StoreError::NotFound(key.to_string())
        })
    }

    /// Overwrites whatever was stored under `key`.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw =
            serde_json::to_string(value).map_err(|err| StoreError::Serialize(err.to_string()))?;
        self.backend.set(key, &raw)
    }
}

/// Store backed by the current platform's session storage.
pub fn session_store() -> ResultStore<PlatformSession> {
    ResultStore::with_backend(PlatformSession)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformSession;

#[cfg(target_arch = "wasm32")]
impl PlatformSession {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|window| window.session_storage().ok().flatten())
    }
}

#[cfg(target_arch = "wasm32")]
impl SessionBackend for PlatformSession {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage().and_then(|storage| storage.get_item(key).ok().flatten())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let storage = Self::storage().ok_or(StoreError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|_| StoreError::Unavailable)
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod memory {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use once_cell::sync::Lazy;

    pub(super) static SESSION: Lazy<Mutex<HashMap<String, String>>> =
        Lazy::new(|| Mutex::new(HashMap::new()));
}

#[cfg(not(target_arch = "wasm32"))]
impl SessionBackend for PlatformSession {
    fn get(&self, key: &str) -> Option<String> {
        memory::SESSION
            .lock()
            .ok()
            .and_then(|map| map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut map = memory::SESSION
            .lock()
            .map_err(|_| StoreError::Unavailable)?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
