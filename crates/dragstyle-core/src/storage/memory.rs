//! In-memory storage implementation.

use super::{Storage, StorageError, StorageResult};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage for testing and ephemeral use.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn load(&self, key: &str) -> StorageResult<Option<String>> {
        let values = self
            .values
            .read()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        Ok(values.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut values = self
            .values
            .write()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        let mut values = self
            .values
            .write()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load() {
        let storage = MemoryStorage::new();
        storage.save("users", "[]").unwrap();
        assert_eq!(storage.load("users").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_missing_key() {
        let storage = MemoryStorage::new();
        assert!(storage.load("nonexistent").unwrap().is_none());
    }

    #[test]
    fn test_save_replaces() {
        let storage = MemoryStorage::new();
        storage.save("scores", "[1]").unwrap();
        storage.save("scores", "[1,2]").unwrap();
        assert_eq!(storage.load("scores").unwrap().as_deref(), Some("[1,2]"));
    }

    #[test]
    fn test_delete() {
        let storage = MemoryStorage::new();
        storage.save("currentUser", "{}").unwrap();
        storage.delete("currentUser").unwrap();
        assert!(storage.load("currentUser").unwrap().is_none());
        // Deleting again is fine.
        storage.delete("currentUser").unwrap();
    }
}
