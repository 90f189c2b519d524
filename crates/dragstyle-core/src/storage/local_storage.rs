//! Browser `localStorage` implementation for WebAssembly.

use super::{Storage, StorageError, StorageResult};

/// Prefix applied to every key so collections don't collide with other apps
/// on the same origin.
const KEY_PREFIX: &str = "dragstyle.";

/// `localStorage`-backed storage for WebAssembly.
///
/// Not Send/Sync: WASM is single-threaded and the handle is a JS object.
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    /// Open the window's local storage.
    pub fn new() -> StorageResult<Self> {
        let window =
            web_sys::window().ok_or_else(|| StorageError::Other("No window object".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| StorageError::Other(format!("localStorage error: {:?}", e)))?
            .ok_or_else(|| StorageError::Other("localStorage not available".to_string()))?;
        Ok(Self { storage })
    }

    fn prefixed(key: &str) -> String {
        format!("{KEY_PREFIX}{key}")
    }
}

impl Storage for LocalStorage {
    fn load(&self, key: &str) -> StorageResult<Option<String>> {
        self.storage
            .get_item(&Self::prefixed(key))
            .map_err(|e| StorageError::Io(format!("Failed to read {}: {:?}", key, e)))
    }

    fn save(&self, key: &str, value: &str) -> StorageResult<()> {
        self.storage
            .set_item(&Self::prefixed(key), value)
            .map_err(|e| StorageError::Io(format!("Failed to write {}: {:?}", key, e)))
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        self.storage
            .remove_item(&Self::prefixed(key))
            .map_err(|e| StorageError::Io(format!("Failed to delete {}: {:?}", key, e)))
    }
}
