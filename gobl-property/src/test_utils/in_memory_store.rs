//! InMemoryStore: HashMap-backed PropertyStore for testing.

use crate::error::StoreError;
use crate::properties::Properties;
use crate::store::PropertyStore;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// Minimal store keeping each collection's encoded bytes behind a `RwLock`.
#[derive(Default)]
pub struct InMemoryStore {
    data: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PropertyStore for InMemoryStore {
    async fn read(&self, key: &str) -> Result<Option<Properties>, StoreError> {
        let data = self
            .data
            .read()
            .map_err(|e| StoreError::ReadFailed(e.to_string()))?;
        match data.get(key) {
            Some(bytes) => Ok(Some(Properties::decode(bytes)?)),
            None => Ok(None),
        }
    }

    async fn write(&self, key: &str, properties: &Properties) -> Result<(), StoreError> {
        let bytes = properties.encode()?;
        let mut data = self
            .data
            .write()
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        data.insert(key.to_owned(), bytes);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        data.remove(key);
        Ok(())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let data = self
            .data
            .read()
            .map_err(|e| StoreError::ReadFailed(e.to_string()))?;
        let mut keys: Vec<String> = data
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect();
        keys.sort();
        Ok(keys)
    }
}
