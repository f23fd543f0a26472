//! Key-value persistence
//!
//! Each key holds one text blob that is read whole and overwritten whole.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::ExpenseError;

use super::file_io::{read_text, write_atomic};

/// A store of text blobs addressed by a fixed key
pub trait KeyValueStore {
    /// Read the blob stored under `key`, or `None` if nothing was stored
    fn get(&self, key: &str) -> Result<Option<String>, ExpenseError>;

    /// Replace the blob stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<(), ExpenseError>;
}

/// Stores each key as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Path of the file backing `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, ExpenseError> {
        read_text(self.path_for(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ExpenseError> {
        write_atomic(self.path_for(key), value.as_bytes())
    }
}

/// In-process store, mostly for tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with `value` already written under `key`
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        if let Ok(mut data) = store.data.write() {
            data.insert(key.to_string(), value.to_string());
        }
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, ExpenseError> {
        let data = self.data.read().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ExpenseError> {
        let mut data = self.data.write().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        data.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
