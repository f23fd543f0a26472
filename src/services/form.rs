//! Add-form state
//!
//! Transient, in-memory only. A fresh form is dated today with the default
//! category preselected; a successful add resets it to that state.

use chrono::{Local, NaiveDate};

use crate::models::Category;

/// The add-expense form as typed by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseForm {
    pub date: String,
    pub category: String,
    pub amount: String,
    pub description: String,
    default_category: Category,
}

impl ExpenseForm {
    /// A blank form dated `today` with `default_category` preselected
    pub fn new(today: NaiveDate, default_category: Category) -> Self {
        Self {
            date: today.format("%Y-%m-%d").to_string(),
            category: default_category.name().to_string(),
            amount: String::new(),
            description: String::new(),
            default_category,
        }
    }

    /// Fill the form in one go
    pub fn filled(
        date: impl Into<String>,
        category: impl Into<String>,
        amount: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            category: category.into(),
            amount: amount.into(),
            description: description.into(),
            default_category: Category::default(),
        }
    }

    /// Restore the defaults: today's date, default category, empty amount and description
    pub fn reset(&mut self) {
        self.reset_to(Local::now().date_naive());
    }

    pub fn reset_to(&mut self, today: NaiveDate) {
        *self = Self::new(today, self.default_category);
    }
}

impl Default for ExpenseForm {
    fn default() -> Self {
        Self::new(Local::now().date_naive(), Category::default())
    }
}
