//! Storage layer for the expense tracker
//!
//! Provides a key-value persistence seam, a file-backed implementation with
//! atomic writes, and the expense repository built on top of it.

pub mod expenses;
pub mod file_io;
pub mod kv;

pub use expenses::{ExpenseRepository, EXPENSES_KEY};
pub use file_io::{read_text, write_atomic};
pub use kv::{FileStore, KeyValueStore, MemoryStore};

use crate::config::paths::ExpensePaths;
use crate::error::ExpenseError;

/// Main storage coordinator
pub struct Storage {
    paths: Option<ExpensePaths>,
    pub expenses: ExpenseRepository,
}

impl Storage {
    /// Create file-backed storage under the configured data directory
    pub fn new(paths: ExpensePaths) -> Result<Self, ExpenseError> {
        paths.ensure_directories()?;

        Ok(Self {
            expenses: ExpenseRepository::new(Box::new(FileStore::new(paths.data_dir()))),
            paths: Some(paths),
        })
    }

    /// Storage over an arbitrary key-value store
    pub fn with_store(store: Box<dyn KeyValueStore>) -> Self {
        Self {
            paths: None,
            expenses: ExpenseRepository::new(store),
        }
    }

    /// In-memory storage that starts empty
    pub fn in_memory() -> Self {
        Self::with_store(Box::new(MemoryStore::new()))
    }

    /// The paths configuration, if file-backed
    pub fn paths(&self) -> Option<&ExpensePaths> {
        self.paths.as_ref()
    }

    /// Load all data from the store
    pub fn load_all(&mut self) -> Result<(), ExpenseError> {
        self.expenses.load()
    }

    /// Save all data to the store
    pub fn save_all(&self) -> Result<(), ExpenseError> {
        self.expenses.save()
    }
}
