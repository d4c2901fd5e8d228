#![deny(missing_docs)]
//! Filesystem-backed implementation of gobl-property's PropertyStore trait.
//!
//! Keys are percent-encoded and stored as one file each under the root
//! directory. File content is the collection's wire encoding. Provides
//! true persistence across process restarts.

use async_trait::async_trait;
use gobl_property::{Properties, PropertyStore, StoreError};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Configuration for [`FsStore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FsStoreConfig {
    /// Directory holding one file per key. Created lazily on first write.
    pub root: PathBuf,

    /// File extension, without the dot.
    pub extension: String,
}

impl Default for FsStoreConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("properties"),
            extension: "json".into(),
        }
    }
}

/// Filesystem-backed property store.
///
/// Directory layout:
/// ```text
/// root/
///   <percent-encoded-key>.json
/// ```
///
/// Suitable for development, single-machine deployments, and cases
/// where data must survive process restarts without a database.
pub struct FsStore {
    config: FsStoreConfig,
}

impl FsStore {
    /// Create a new filesystem store rooted at the given directory.
    ///
    /// The directory is created lazily on first write.
    pub fn new(root: &Path) -> Self {
        Self::with_config(FsStoreConfig {
            root: root.to_path_buf(),
            ..FsStoreConfig::default()
        })
    }

    /// Create a store from explicit configuration.
    pub fn with_config(config: FsStoreConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &FsStoreConfig {
        &self.config
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.config
            .root
            .join(key_to_filename(key, &self.config.extension))
    }
}

/// Encode a key into a safe filename.
fn key_to_filename(key: &str, extension: &str) -> String {
    let mut encoded = String::with_capacity(key.len() + extension.len() + 1);
    for byte in key.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_' => encoded.push(char::from(byte)),
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    encoded.push('.');
    encoded.push_str(extension);
    encoded
}

/// Decode a filename back to a key.
fn filename_to_key(filename: &str, extension: &str) -> Option<String> {
    let name = filename
        .strip_suffix(extension)?
        .strip_suffix('.')?;
    let bytes = name.as_bytes();
    let mut result = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = std::str::from_utf8(bytes.get(i + 1..i + 3)?).ok()?;
            result.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            result.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(result).ok()
}

#[async_trait]
impl PropertyStore for FsStore {
    async fn read(&self, key: &str) -> Result<Option<Properties>, StoreError> {
        let path = self.path_for(key);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(key, "property read miss");
                return Ok(None);
            }
            Err(e) => return Err(StoreError::ReadFailed(e.to_string())),
        };
        match Properties::decode(&bytes) {
            Ok(properties) => {
                debug!(key, bytes = bytes.len(), entries = properties.len(), "property read");
                Ok(Some(properties))
            }
            Err(e) => {
                warn!(key, path = %path.display(), error = %e, "stored properties failed to decode");
                Err(e.into())
            }
        }
    }

    async fn write(&self, key: &str, properties: &Properties) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.config.root)
            .await
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        let bytes = properties.encode()?;
        let path = self.path_for(key);
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        debug!(key, bytes = bytes.len(), entries = properties.len(), "property write");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => {
                debug!(key, "property delete");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::WriteFailed(e.to_string())),
        }
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let mut entries = match tokio::fs::read_dir(&self.config.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => return Err(StoreError::ReadFailed(e.to_string())),
        };

        let mut keys = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StoreError::ReadFailed(e.to_string()))?
        {
            let Some(filename) = entry.file_name().to_str().map(str::to_owned) else {
                continue;
            };
            if let Some(key) = filename_to_key(&filename, &self.config.extension) {
                if key.starts_with(prefix) {
                    keys.push(key);
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}
