//! Expense repository
//!
//! Holds the ordered expense collection (newest first) and writes it back to
//! the key-value store under the `expenses` key.

use std::sync::RwLock;

use tracing::{debug, warn};

use crate::error::ExpenseError;
use crate::models::{Category, Expense, ExpenseId};

use super::kv::KeyValueStore;

/// Key the whole collection is stored under
pub const EXPENSES_KEY: &str = "expenses";

/// Repository for the expense collection
pub struct ExpenseRepository {
    store: Box<dyn KeyValueStore>,
    data: RwLock<Vec<Expense>>,
}

impl ExpenseRepository {
    /// Create a repository over `store`; call [`load`](Self::load) before use
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self {
            store,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Load the collection from the store
    ///
    /// A missing, blank, or unparseable blob yields an empty collection. Parse
    /// failures are logged and otherwise swallowed.
    pub fn load(&self) -> Result<(), ExpenseError> {
        let loaded = match self.store.get(EXPENSES_KEY)? {
            Some(blob) if !blob.trim().is_empty() => {
                match serde_json::from_str::<Vec<Expense>>(&blob) {
                    Ok(expenses) => expenses,
                    Err(e) => {
                        warn!("Discarding malformed stored expenses: {}", e);
                        Vec::new()
                    }
                }
            }
            _ => Vec::new(),
        };

        debug!("Loaded {} expenses", loaded.len());

        let mut data = self.data.write().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        *data = loaded;
        Ok(())
    }

    /// Write the whole collection back to the store
    pub fn save(&self) -> Result<(), ExpenseError> {
        let data = self.data.read().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let blob = serde_json::to_string(&*data)?;
        self.store.set(EXPENSES_KEY, &blob)?;
        debug!("Saved {} expenses", data.len());
        Ok(())
    }

    /// All expenses, newest first
    pub fn get_all(&self) -> Result<Vec<Expense>, ExpenseError> {
        let data = self.data.read().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.clone())
    }

    pub fn get(&self, id: ExpenseId) -> Result<Option<Expense>, ExpenseError> {
        let data = self.data.read().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.iter().find(|e| e.id == id).cloned())
    }

    /// Find expenses whose ID starts with `prefix`
    pub fn find_by_prefix(&self, prefix: &str) -> Result<Vec<Expense>, ExpenseError> {
        let data = self.data.read().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data
            .iter()
            .filter(|e| e.id.matches_prefix(prefix))
            .cloned()
            .collect())
    }

    /// Insert at the front of the collection
    pub fn prepend(&self, expense: Expense) -> Result<(), ExpenseError> {
        let mut data = self.data.write().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        data.insert(0, expense);
        Ok(())
    }

    /// Remove the expense with `id`, returning it if it was present
    pub fn delete(&self, id: ExpenseId) -> Result<Option<Expense>, ExpenseError> {
        let mut data = self.data.write().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let position = data.iter().position(|e| e.id == id);
        Ok(position.map(|index| data.remove(index)))
    }

    /// Remove every expense in `category`, returning how many were removed
    pub fn delete_by_category(&self, category: Category) -> Result<usize, ExpenseError> {
        let mut data = self.data.write().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let before = data.len();
        data.retain(|e| e.category != category);
        Ok(before - data.len())
    }

    /// Remove everything, returning how many were removed
    pub fn clear(&self) -> Result<usize, ExpenseError> {
        let mut data = self.data.write().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let count = data.len();
        data.clear();
        Ok(count)
    }

    pub fn count(&self) -> Result<usize, ExpenseError> {
        let data = self.data.read().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.len())
    }
}
