//! Key-value slots: the local storage the roster persists into.

use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read storage file '{}': {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("storage file '{}' is not a key-value object: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to write storage file '{}': {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("malformed records under key '{key}': {reason}")]
    MalformedRecords { key: String, reason: String },
    #[error("failed to encode storage payload: {0}")]
    Encode(#[from] serde_json::Error),
}

/// String-to-string storage with the semantics of a browser origin's local storage.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(key: &str, value: &str) -> Self {
        let mut storage = Self::new();
        storage.items.insert(key.to_string(), value.to_string());
        storage
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.items.remove(key);
        Ok(())
    }
}

/// A JSON object file holding every key of the slot. A missing file reads as empty.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_items(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&raw).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Unreadable contents are replaced rather than blocking every later write.
    fn items_for_write(&self) -> BTreeMap<String, String> {
        match self.read_items() {
            Ok(items) => items,
            Err(error) => {
                tracing::warn!(path = %self.path.display(), %error, "discarding unreadable storage file");
                BTreeMap::new()
            }
        }
    }

    fn write_items(&self, items: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let payload = serde_json::to_string_pretty(items)?;
        let write_err = |source: io::Error| StorageError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);
        fs::write(&tmp_path, payload).map_err(write_err)?;
        if let Err(source) = fs::rename(&tmp_path, &self.path) {
            if let Err(error) = fs::remove_file(&tmp_path) {
                tracing::warn!(path = %tmp_path.display(), %error, "failed to remove temp storage file");
            }
            return Err(write_err(source));
        }
        Ok(())
    }
}

impl KeyValueStore for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_items()?.remove(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items_for_write();
        items.insert(key.to_string(), value.to_string());
        self.write_items(&items)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        let mut items = self.items_for_write();
        if items.remove(key).is_none() {
            return Ok(());
        }
        self.write_items(&items)
    }
}

#[cfg(test)]
#[path = "tests/kv_tests.rs"]
mod tests;
