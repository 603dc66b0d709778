//! JSON values in LocalStorage
//!
//! On native targets there is no browser storage: loads report
//! `StorageUnavailable` and saves are no-ops, so callers fall back to
//! defaults the same way they would in a locked-down browser.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{HostError, Result};

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Result<web_sys::Storage> {
    let window = web_sys::window().ok_or(HostError::NoWindow)?;
    window
        .local_storage()?
        .ok_or(HostError::StorageUnavailable)
}

/// Load and decode a value. `Ok(None)` when the key is absent.
#[cfg(target_arch = "wasm32")]
pub fn load_json<T: DeserializeOwned>(key: &str) -> Result<Option<T>> {
    let storage = local_storage()?;
    match storage.get_item(key)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

/// Encode and store a value
#[cfg(target_arch = "wasm32")]
pub fn save_json<T: Serialize>(key: &str, value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    local_storage()?.set_item(key, &json)?;
    Ok(())
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
pub fn load_json<T: DeserializeOwned>(_key: &str) -> Result<Option<T>> {
    Err(HostError::StorageUnavailable)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save_json<T: Serialize>(_key: &str, value: &T) -> Result<()> {
    // Still encode so serialization problems surface in native tests
    serde_json::to_string(value)?;
    Ok(())
}

/// Load a value, logging and falling back to `T::default()` on any failure
pub fn load_or_default<T: DeserializeOwned + Default>(key: &str) -> T {
    match load_json(key) {
        Ok(Some(value)) => {
            log::info!("Loaded {key} from storage");
            value
        }
        Ok(None) => {
            log::info!("No stored {key}, using defaults");
            T::default()
        }
        Err(e) => {
            log::warn!("Could not load {key}: {e}");
            T::default()
        }
    }
}

/// Save a value, logging failures instead of propagating them
pub fn save_or_warn<T: Serialize>(key: &str, value: &T) {
    match save_json(key, value) {
        Ok(()) => log::debug!("Saved {key}"),
        Err(e) => log::warn!("Could not save {key}: {e}"),
    }
}
