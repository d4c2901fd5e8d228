#![deny(missing_docs)]
//! In-memory implementation of gobl-property's PropertyStore trait.
//!
//! Uses a `HashMap` behind a `RwLock` for concurrent access. Each
//! collection is held as its stored column value and decoded on read.

use async_trait::async_trait;
use gobl_property::{Properties, PropertyStore, StoreError, StoredValue};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// In-memory property store backed by a `HashMap` behind a `RwLock`.
///
/// Suitable for testing, prototyping, and single-process use cases
/// where persistence across restarts is not required.
pub struct MemoryStore {
    data: RwLock<HashMap<String, StoredValue>>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Store a raw column value under `key`, as a database row would hold it.
    pub async fn insert_stored(&self, key: impl Into<String>, column: StoredValue) {
        self.data.write().await.insert(key.into(), column);
    }

    /// Number of stored collections.
    pub async fn len(&self) -> usize {
        self.data.read().await.len()
    }

    /// True when nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.data.read().await.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PropertyStore for MemoryStore {
    async fn read(&self, key: &str) -> Result<Option<Properties>, StoreError> {
        let column = self.data.read().await.get(key).cloned();
        let Some(column) = column else {
            debug!(key, "property read miss");
            return Ok(None);
        };
        let bytes = column.len();
        let mut properties = Properties::new();
        if let Err(e) = properties.scan(Some(column)) {
            warn!(key, error = %e, "stored properties failed to decode");
            return Err(e.into());
        }
        debug!(key, bytes, entries = properties.len(), "property read");
        Ok(Some(properties))
    }

    async fn write(&self, key: &str, properties: &Properties) -> Result<(), StoreError> {
        let column = properties.to_stored()?;
        debug!(key, bytes = column.len(), entries = properties.len(), "property write");
        self.data.write().await.insert(key.to_owned(), column);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let removed = self.data.write().await.remove(key).is_some();
        debug!(key, removed, "property delete");
        Ok(())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let data = self.data.read().await;
        let mut keys: Vec<String> = data
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gobl_property::Property;

    #[tokio::test]
    async fn write_stores_bytes_column() {
        let store = MemoryStore::new();
        let props: Properties = [Property::bool("on", true)].into_iter().collect();
        store.write("k", &props).await.unwrap();

        let data = store.data.read().await;
        assert!(matches!(data.get("k"), Some(StoredValue::Bytes(_))));
    }

    #[tokio::test]
    async fn text_column_reads_back() {
        let store = MemoryStore::new();
        store
            .insert_stored(
                "k",
                StoredValue::Text(r#"{"n":{"name":"n","type":9,"value":65535}}"#.into()),
            )
            .await;
        let props = store.read("k").await.unwrap().unwrap();
        assert_eq!(props.require("n").unwrap().as_uint16().unwrap(), 65535);
    }

    #[tokio::test]
    async fn corrupt_column_is_an_encoding_error() {
        let store = MemoryStore::new();
        store
            .insert_stored(
                "k",
                StoredValue::Text(r#"{"n":{"name":"n","type":9,"value":65536}}"#.into()),
            )
            .await;
        assert!(matches!(
            store.read("k").await,
            Err(StoreError::Encoding(_))
        ));
    }
}
