//! # Disk Store
//!
//! The filesystem-backed store. Owns a single absolute, normalized root
//! directory fixed at startup; every operation resolves the caller-supplied
//! name against that root and refuses anything that would land outside it.
//! The filesystem is the sole source of truth; nothing is cached between
//! operations.

use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::observability::{Logger, Severity};

use super::backend::FileStore;
use super::errors::{StorageError, StorageResult};
use super::paths;

/// Filesystem-backed file store
#[derive(Debug)]
pub struct DiskStore {
    root: PathBuf,
}

impl DiskStore {
    /// Open a store rooted at `root`, creating the directory (and any
    /// missing parents) if absent.
    ///
    /// The root is absolutized and lexically normalized once; it never
    /// changes for the lifetime of the store. Failure here is a startup
    /// precondition violation, not a per-request error; callers are
    /// expected to abort.
    pub fn open(root: &Path) -> StorageResult<Self> {
        let absolute = if root.is_absolute() {
            root.to_path_buf()
        } else {
            let cwd = std::env::current_dir()
                .map_err(|e| StorageError::Io(format!("Cannot resolve working directory: {}", e)))?;
            cwd.join(root)
        };
        let root = paths::normalize_absolute(&absolute);

        fs::create_dir_all(&root).map_err(|e| {
            StorageError::Io(format!(
                "Cannot create storage root {}: {}",
                root.display(),
                e
            ))
        })?;

        Logger::log(
            Severity::Info,
            "storage_root_ready",
            &[("root", &root.display().to_string())],
        );

        Ok(Self { root })
    }

    /// The absolute storage root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `name` to the absolute path of an existing file.
    ///
    /// Containment is checked before existence: a name that folds outside
    /// the root is `InvalidInput` even when nothing exists there.
    pub fn resolve(&self, name: &str) -> StorageResult<PathBuf> {
        let path = self.name_path(name)?;
        if !path.is_file() {
            return Err(StorageError::NotFound(name.to_string()));
        }
        Ok(path)
    }

    /// Containment-checked path for `name`, with no existence requirement.
    fn name_path(&self, name: &str) -> StorageResult<PathBuf> {
        let relative = paths::normalize_name(name)?;
        Ok(self.root.join(relative))
    }

    /// Containment-checked path for a destination directory.
    fn location_path(&self, location: &str) -> StorageResult<PathBuf> {
        let relative = paths::normalize_location(location)?;
        Ok(paths::join_under(&self.root, &relative))
    }
}

impl FileStore for DiskStore {
    fn store(&self, content: &[u8], original_name: &str) -> StorageResult<String> {
        if content.is_empty() {
            return Err(StorageError::InvalidInput(
                "Cannot store an empty file".to_string(),
            ));
        }

        let cleaned = paths::clean_name(original_name);
        let name = format!("{}{}", Uuid::new_v4(), paths::extension_of(&cleaned));

        // Overwrite-not-fail: token uniqueness makes a pre-existing file at
        // this path astronomically unlikely, and fs::write replaces it.
        let target = self.name_path(&name)?;
        fs::write(&target, content).map_err(|e| StorageError::Io(e.to_string()))?;

        Logger::log(
            Severity::Info,
            "file_stored",
            &[("bytes", &content.len().to_string()), ("name", &name)],
        );
        Ok(name)
    }

    fn load(&self, name: &str) -> StorageResult<Vec<u8>> {
        let path = self.resolve(name)?;
        fs::read(&path).map_err(|e| StorageError::Io(e.to_string()))
    }

    fn delete(&self, name: &str) -> StorageResult<()> {
        let path = self.resolve(name)?;
        fs::remove_file(&path).map_err(|e| StorageError::Io(e.to_string()))?;

        Logger::log(Severity::Info, "file_deleted", &[("name", name)]);
        Ok(())
    }

    fn rename(&self, old_name: &str, new_name: &str) -> StorageResult<String> {
        let old_path = self.resolve(old_name)?;
        let new_path = self.name_path(new_name)?;

        if new_path.exists() {
            return Err(StorageError::Conflict(new_name.to_string()));
        }

        // The existence check and the rename are two filesystem calls, so
        // concurrent renames to the same target may race. Accepted: the
        // loser either overwrites or observes Conflict.
        fs::rename(&old_path, &new_path).map_err(|e| StorageError::Io(e.to_string()))?;

        Logger::log(
            Severity::Info,
            "file_renamed",
            &[("from", old_name), ("to", new_name)],
        );
        Ok(new_name.to_string())
    }

    fn move_to(&self, name: &str, new_location: &str) -> StorageResult<String> {
        let old_path = self.resolve(name)?;
        let dir = self.location_path(new_location)?;

        fs::create_dir_all(&dir).map_err(|e| StorageError::Io(e.to_string()))?;

        let file_name = old_path.file_name().ok_or_else(|| {
            StorageError::InvalidInput(format!("Name does not identify a file: {}", name))
        })?;
        let new_path = dir.join(file_name);

        // Unlike rename, move replaces an existing target silently.
        fs::rename(&old_path, &new_path).map_err(|e| StorageError::Io(e.to_string()))?;

        Logger::log(
            Severity::Info,
            "file_moved",
            &[("name", name), ("to", new_location)],
        );
        Ok(new_path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_store() -> (DiskStore, TempDir) {
        let temp = TempDir::new().unwrap();
        let store = DiskStore::open(temp.path()).unwrap();
        (store, temp)
    }

    #[test]
    fn test_open_creates_missing_root() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("depot/files");
        assert!(!root.exists());

        let store = DiskStore::open(&root).unwrap();
        assert!(root.is_dir());
        assert_eq!(store.root(), root.as_path());
    }

    #[test]
    fn test_open_existing_root_is_idempotent() {
        let temp = TempDir::new().unwrap();
        DiskStore::open(temp.path()).unwrap();
        DiskStore::open(temp.path()).unwrap();
    }

    #[test]
    fn test_open_fails_when_root_is_a_file() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("occupied");
        fs::write(&root, b"not a directory").unwrap();

        let result = DiskStore::open(&root);
        assert!(matches!(result, Err(StorageError::Io(_))));
    }

    #[test]
    fn test_store_writes_under_root() {
        let (store, _temp) = open_store();

        let name = store.store(b"hello", "greeting.txt").unwrap();
        assert!(name.ends_with(".txt"));
        assert!(store.root().join(&name).is_file());
    }

    #[test]
    fn test_resolve_rejects_escape_before_existence() {
        let (store, _temp) = open_store();

        let result = store.resolve("../outside.txt");
        assert!(matches!(result, Err(StorageError::InvalidInput(_))));
    }

    #[test]
    fn test_resolve_missing_is_not_found() {
        let (store, _temp) = open_store();

        let result = store.resolve("nope.txt");
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_resolve_directory_is_not_a_file() {
        let (store, _temp) = open_store();
        fs::create_dir(store.root().join("subdir")).unwrap();

        let result = store.resolve("subdir");
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_crafted_upload_name_stays_inside_root() {
        let (store, temp) = open_store();

        let name = store.store(b"payload", "../../evil.sh").unwrap();
        assert!(name.ends_with(".sh"));
        assert!(store.root().join(&name).is_file());
        assert!(!temp.path().parent().unwrap().join("evil.sh").exists());
    }

    #[test]
    fn test_move_to_root_location() {
        let (store, _temp) = open_store();

        let name = store.store(b"data", "f.bin").unwrap();
        store.move_to(&name, "archive").unwrap();
        let back = store.move_to(&format!("archive/{}", name), "").unwrap();

        assert_eq!(back, store.root().join(&name).display().to_string());
        assert_eq!(store.load(&name).unwrap(), b"data");
    }
}
