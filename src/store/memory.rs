//! # In-Memory Store
//!
//! A `FileStore` over a `RwLock<HashMap>`, keyed by the same normalized
//! relative paths the disk store uses. Exists so the boundary layer can be
//! exercised without touching a filesystem; semantics (containment,
//! conflict, replace-on-move) match the disk store.

use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;

use super::backend::FileStore;
use super::errors::{StorageError, StorageResult};
use super::paths;

/// In-memory file store
#[derive(Debug, Default)]
pub struct MemoryStore {
    files: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of files currently held
    pub fn len(&self) -> usize {
        self.files.read().map(|files| files.len()).unwrap_or(0)
    }

    /// Whether the store holds no files
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FileStore for MemoryStore {
    fn store(&self, content: &[u8], original_name: &str) -> StorageResult<String> {
        if content.is_empty() {
            return Err(StorageError::InvalidInput(
                "Cannot store an empty file".to_string(),
            ));
        }

        let cleaned = paths::clean_name(original_name);
        let name = format!("{}{}", Uuid::new_v4(), paths::extension_of(&cleaned));

        let mut files = self
            .files
            .write()
            .map_err(|_| StorageError::Io("Lock poisoned".to_string()))?;
        files.insert(name.clone(), content.to_vec());

        Ok(name)
    }

    fn load(&self, name: &str) -> StorageResult<Vec<u8>> {
        let key = paths::normalize_name(name)?;

        let files = self
            .files
            .read()
            .map_err(|_| StorageError::Io("Lock poisoned".to_string()))?;
        files
            .get(&key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(name.to_string()))
    }

    fn delete(&self, name: &str) -> StorageResult<()> {
        let key = paths::normalize_name(name)?;

        let mut files = self
            .files
            .write()
            .map_err(|_| StorageError::Io("Lock poisoned".to_string()))?;
        files
            .remove(&key)
            .map(|_| ())
            .ok_or_else(|| StorageError::NotFound(name.to_string()))
    }

    fn rename(&self, old_name: &str, new_name: &str) -> StorageResult<String> {
        let old_key = paths::normalize_name(old_name)?;

        let mut files = self
            .files
            .write()
            .map_err(|_| StorageError::Io("Lock poisoned".to_string()))?;

        if !files.contains_key(&old_key) {
            return Err(StorageError::NotFound(old_name.to_string()));
        }
        let new_key = paths::normalize_name(new_name)?;
        if files.contains_key(&new_key) {
            return Err(StorageError::Conflict(new_name.to_string()));
        }
        if let Some(content) = files.remove(&old_key) {
            files.insert(new_key, content);
        }

        Ok(new_name.to_string())
    }

    fn move_to(&self, name: &str, new_location: &str) -> StorageResult<String> {
        let old_key = paths::normalize_name(name)?;

        let mut files = self
            .files
            .write()
            .map_err(|_| StorageError::Io("Lock poisoned".to_string()))?;

        // Source is resolved before the destination is even looked at, so a
        // missing file reports NotFound rather than a destination error.
        if !files.contains_key(&old_key) {
            return Err(StorageError::NotFound(name.to_string()));
        }
        let location = paths::normalize_location(new_location)?;

        let content = files
            .remove(&old_key)
            .ok_or_else(|| StorageError::NotFound(name.to_string()))?;

        let file_name = old_key.rsplit('/').next().unwrap_or(&old_key).to_string();
        let new_key = if location.is_empty() {
            file_name
        } else {
            format!("{}/{}", location, file_name)
        };

        // Replace semantics: an occupied target is overwritten.
        files.insert(new_key.clone(), content);

        Ok(new_key)
    }
}
