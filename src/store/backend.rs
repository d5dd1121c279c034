//! # File Store Trait

use super::errors::StorageResult;

/// Capability set of a file store.
///
/// The five lifecycle operations over named files. Backends must be safe to
/// call concurrently; all state lives behind `&self`.
pub trait FileStore: Send + Sync + std::fmt::Debug {
    /// Persist `content` under a freshly generated storage name.
    ///
    /// The name is a random 128-bit token plus the extension of the cleaned
    /// `original_name`. Empty content is rejected; nothing is written.
    fn store(&self, content: &[u8], original_name: &str) -> StorageResult<String>;

    /// Read the content stored under `name`.
    fn load(&self, name: &str) -> StorageResult<Vec<u8>>;

    /// Remove the file stored under `name`.
    fn delete(&self, name: &str) -> StorageResult<()>;

    /// Give the file stored under `old_name` a new identity.
    ///
    /// Fails with `Conflict` when `new_name` is already occupied. Returns the
    /// new name.
    fn rename(&self, old_name: &str, new_name: &str) -> StorageResult<String>;

    /// Relocate the file into `new_location` (a directory under the root),
    /// keeping its storage name. Any existing file at the target is replaced.
    /// Returns the new path as a string.
    fn move_to(&self, name: &str, new_location: &str) -> StorageResult<String>;
}
