//! Expense service
//!
//! Business logic for recording and deleting expenses. Every mutation is
//! written back to storage before the call returns.
//!
//! Bulk deletions are split in two: a `plan_*` call reports what would be
//! removed, and [`ExpenseService::commit`] removes it once the caller has
//! obtained confirmation.

use chrono::NaiveDate;
use tracing::info;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Category, CategoryFilter, Expense, ExpenseId, Money};
use crate::storage::Storage;

use super::form::ExpenseForm;
use super::view;

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

/// What a bulk deletion covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionScope {
    All,
    Category(Category),
}

/// A pending bulk deletion awaiting confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkDeletion {
    pub scope: DeletionScope,
    /// Number of expenses that matched when the plan was made
    pub count: usize,
}

impl BulkDeletion {
    /// Prompt text naming the count and, for category deletions, the category
    pub fn confirmation_message(&self) -> String {
        match self.scope {
            DeletionScope::All => format!(
                "Are you sure you want to delete all {} expense(s)? This cannot be undone.",
                self.count
            ),
            DeletionScope::Category(category) => format!(
                "Are you sure you want to delete {} expense(s) in category \"{}\"? This cannot be undone.",
                self.count, category
            ),
        }
    }
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Validate the form, record the expense at the front of the collection,
    /// and reset the form
    ///
    /// On any validation failure nothing is stored and the form is untouched.
    pub fn add(&self, form: &mut ExpenseForm) -> ExpenseResult<Expense> {
        let expense = Self::parse_form(form)?;

        self.storage.expenses.prepend(expense.clone())?;
        self.storage.expenses.save()?;
        info!(id = %expense.id, category = %expense.category, amount = %expense.amount, "Added expense");

        form.reset();
        Ok(expense)
    }

    fn parse_form(form: &ExpenseForm) -> ExpenseResult<Expense> {
        let date = form.date.trim();
        let category = form.category.trim();
        let amount = form.amount.trim();

        if date.is_empty() || category.is_empty() || amount.is_empty() {
            return Err(ExpenseError::Validation(
                "Please fill in all required fields (date, category, amount)".into(),
            ));
        }

        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
            ExpenseError::Validation(format!("Invalid date format: '{}'. Use YYYY-MM-DD", date))
        })?;

        let category = category
            .parse::<Category>()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        let amount = Money::parse(amount).map_err(|e| ExpenseError::Validation(e.to_string()))?;

        Ok(Expense::new(date, category, amount, form.description.trim()))
    }

    pub fn get(&self, id: ExpenseId) -> ExpenseResult<Option<Expense>> {
        self.storage.expenses.get(id)
    }

    /// Find an expense by full ID or by an unambiguous short ID
    pub fn find(&self, identifier: &str) -> ExpenseResult<Option<Expense>> {
        if let Ok(id) = identifier.parse::<ExpenseId>() {
            return self.storage.expenses.get(id);
        }

        let mut matches = self.storage.expenses.find_by_prefix(identifier)?;
        match matches.len() {
            0 => Ok(None),
            1 => Ok(matches.pop()),
            n => Err(ExpenseError::Validation(format!(
                "'{}' matches {} expenses; use a longer ID",
                identifier, n
            ))),
        }
    }

    /// Expenses matching `filter`, newest first
    pub fn list(&self, filter: &CategoryFilter) -> ExpenseResult<Vec<Expense>> {
        let all = self.storage.expenses.get_all()?;
        Ok(view::filtered(&all, filter))
    }

    /// Delete one expense; a missing ID is a no-op
    pub fn remove(&self, id: ExpenseId) -> ExpenseResult<Option<Expense>> {
        let removed = self.storage.expenses.delete(id)?;
        if let Some(expense) = &removed {
            self.storage.expenses.save()?;
            info!(id = %expense.id, "Removed expense");
        }
        Ok(removed)
    }

    /// Plan clearing the whole collection
    pub fn plan_remove_all(&self) -> ExpenseResult<BulkDeletion> {
        let count = self.storage.expenses.count()?;
        if count == 0 {
            return Err(ExpenseError::NothingToDelete("to delete".into()));
        }

        Ok(BulkDeletion {
            scope: DeletionScope::All,
            count,
        })
    }

    /// Plan deleting every expense in the selected category
    ///
    /// Rejected while the selection is "All" or when nothing matches.
    pub fn plan_remove_by_category(&self, selection: &CategoryFilter) -> ExpenseResult<BulkDeletion> {
        let category = selection.category().ok_or(ExpenseError::CategoryRequired)?;

        let count = self
            .storage
            .expenses
            .get_all()?
            .iter()
            .filter(|e| e.category == category)
            .count();

        if count == 0 {
            return Err(ExpenseError::NothingToDelete(format!(
                "in category \"{}\"",
                category
            )));
        }

        Ok(BulkDeletion {
            scope: DeletionScope::Category(category),
            count,
        })
    }

    /// Carry out a confirmed bulk deletion, returning how many were removed
    pub fn commit(&self, plan: BulkDeletion) -> ExpenseResult<usize> {
        let removed = match plan.scope {
            DeletionScope::All => self.storage.expenses.clear()?,
            DeletionScope::Category(category) => {
                self.storage.expenses.delete_by_category(category)?
            }
        };

        self.storage.expenses.save()?;
        info!(removed, scope = ?plan.scope, "Bulk deletion committed");
        Ok(removed)
    }
}
