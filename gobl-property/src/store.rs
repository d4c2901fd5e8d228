//! The persistence boundary: where [`Properties`] cross into a store.

use crate::error::StoreError;
use crate::properties::Properties;
use async_trait::async_trait;

/// A byte-oriented store of [`Properties`] collections.
///
/// Implementations persist whatever [`Properties::encode`] (or
/// [`Properties::to_stored`]) produces and rebuild with the matching decode,
/// so a collection read back is equal to the one written.
///
/// Implementations:
/// - `MemoryStore` (gobl-state-memory): column values in a `HashMap`
/// - `FsStore` (gobl-state-fs): one encoded file per key
#[async_trait]
pub trait PropertyStore: Send + Sync {
    /// Read the collection stored under `key`.
    /// Returns None if the key doesn't exist.
    async fn read(&self, key: &str) -> Result<Option<Properties>, StoreError>;

    /// Write a collection. Creates or overwrites.
    async fn write(&self, key: &str, properties: &Properties) -> Result<(), StoreError>;

    /// Delete a collection. No-op if key doesn't exist.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// List keys starting with `prefix`, sorted.
    async fn list(&self, prefix: &str) -> Result<Vec<String>, StoreError>;
}
