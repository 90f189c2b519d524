//! Key/value storage abstraction for persistence.
//!
//! Values are whole serialized collections. A backend replaces a key's value
//! as one unit; there is no partial update and no cross-process locking, so
//! two writers racing on the same key resolve as last-writer-wins.

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

#[cfg(target_arch = "wasm32")]
mod local_storage;

pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorage;

use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Remote error: {0}")]
    Remote(String),
    #[error("Unsupported operation: {0}")]
    Unsupported(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for key/value storage backends.
///
/// Implementations can store values in memory, on the filesystem or in the
/// browser's `localStorage`.
pub trait Storage {
    /// Read the raw value under `key`, or `None` if nothing is stored.
    fn load(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replace the value under `key`.
    fn save(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove `key`. Removing a missing key succeeds.
    fn delete(&self, key: &str) -> StorageResult<()>;
}
